use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, user_id: u64, chat_id: i64, error: &str) {
    error!(
        "CMD_ERROR: {} by {}({}) in chat {} - {}",
        command, user, user_id, chat_id, error
    );
}

/// Logs rejected user input with consistent format
pub fn log_validation_error(action: &str, value: &str, error: &str, user_id: u64) {
    warn!(
        "VALIDATION_ERROR: {} - value '{}' invalid: {} - user {}",
        action, value, error, user_id
    );
}

/// Logs tournament progress with consistent format
pub fn log_game_event(event: &str, user_id: u64, details: Option<&str>) {
    match details {
        Some(d) => info!("GAME: {} for user {} - {}", event, user_id, d),
        None => info!("GAME: {} for user {}", event, user_id),
    }
}

/// Logs storage operations with consistent format
pub fn log_storage_operation(operation: &str, target: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("STORAGE_OP: {} on {} - {}", operation, target, d),
        None => debug!("STORAGE_OP: {} on {}", operation, target),
    }
}

/// Logs storage errors with consistent format
pub fn log_storage_error(operation: &str, target: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("STORAGE_ERROR: {} on {} failed: {} - {}", operation, target, error, d),
        None => error!("STORAGE_ERROR: {} on {} failed: {}", operation, target, error),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
