use std::sync::Arc;

use crate::apis::resource::CallResourceHandler;

#[derive(Clone)]
pub struct HttpState {
    pub resources: Arc<dyn CallResourceHandler>,
}

impl HttpState {
    pub fn new(resources: Arc<dyn CallResourceHandler>) -> Self {
        Self { resources }
    }
}
