use uuid::Uuid;

/// Source of `versionId` values.
pub trait IdGenerator: Send + Sync {
    fn version_id(&self) -> Uuid;
}

/// Random v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn version_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Hands out the same identifier on every call.
#[derive(Debug, Clone, Copy)]
pub struct FixedIdGenerator(pub Uuid);

impl IdGenerator for FixedIdGenerator {
    fn version_id(&self) -> Uuid {
        self.0
    }
}
