//! Mock implementations for testing account verification

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::value_objects::VerificationPurpose;
use crate::services::account_verification::NotificationServiceTrait;

// Mock notification service for testing
pub struct MockNotificationService {
    pub sent_messages: Arc<Mutex<HashMap<String, (String, VerificationPurpose)>>>,
    pub should_fail: bool,
}

impl MockNotificationService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn get_sent_code(&self, recipient: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .get(recipient)
            .map(|(code, _)| code.clone())
    }

    pub fn get_sent_purpose(&self, recipient: &str) -> Option<VerificationPurpose> {
        self.sent_messages
            .lock()
            .unwrap()
            .get(recipient)
            .map(|(_, purpose)| *purpose)
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationServiceTrait for MockNotificationService {
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Email service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(recipient.to_string(), (code.to_string(), purpose));
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}
