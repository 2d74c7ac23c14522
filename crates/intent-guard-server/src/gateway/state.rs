use std::sync::Arc;

use intent_guard::BullyingClassifier;

#[derive(Clone)]
pub struct HandlerState {
    pub classifier: Arc<BullyingClassifier>,
}

impl HandlerState {
    pub fn new(classifier: Arc<BullyingClassifier>) -> Self {
        Self { classifier }
    }
}
