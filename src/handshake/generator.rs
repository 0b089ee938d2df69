use uuid::Uuid;

/// Source of the random values embedded in outgoing redirect requests.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random (v4) UUIDs in their hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
