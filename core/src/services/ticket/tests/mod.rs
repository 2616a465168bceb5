//! Tests for the ticket service
