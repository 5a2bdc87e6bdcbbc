// Delete operation trait and implementation
use crate::error::Result;
use opendal::Operator;

/// Trait for deleting objects from storage.
pub trait Deleter {
    /// Delete a single object.
    ///
    /// # Arguments
    /// * `object` - Object name to delete
    ///
    /// # Returns
    /// * `Result<()>` - Success, or the backend's not-found error if the object is absent
    async fn delete(&self, object: &str) -> Result<()>;
}

/// Implementation of Deleter for OpenDAL Operator.
pub struct OpenDalDeleter {
    operator: Operator,
}

impl OpenDalDeleter {
    /// Create a new deleter with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Deleter for OpenDalDeleter {
    async fn delete(&self, object: &str) -> Result<()> {
        // OpenDAL treats deleting a missing object as success.
        self.operator.stat(object).await?;
        self.operator.delete(object).await?;
        log::debug!("deleted {object}");
        Ok(())
    }
}
