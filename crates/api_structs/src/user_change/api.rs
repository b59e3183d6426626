use crate::user_change::dtos::UserChangeMessageDTO;
use serde::{Deserialize, Serialize};

pub mod process_user_changes {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequestBody {
        pub messages: Vec<UserChangeMessageDTO>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct APIResponse {
        pub applied: usize,
        pub failed: usize,
    }
}
