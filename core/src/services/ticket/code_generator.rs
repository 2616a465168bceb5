//! Source of candidate ticket codes

use crate::domain::entities::ticket::Ticket;

/// Produces candidate ticket codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random codes over the ticket alphabet
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        Ticket::generate_code()
    }
}
