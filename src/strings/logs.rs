pub fn config_read_error(path: &str) -> String {
    format!("Failed to read {path}")
}

pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";

pub const STARTING: &str = "Starting Acrobot...";

pub fn database_ready(url: &str) -> String {
    format!("Glossary database ready at {url}")
}

pub fn login_success(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("Received invite for room {room_id}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub fn route_fail(err: &str) -> String {
    format!("Failed to route message: {err}")
}

pub fn reply_fail(room_id: &str, err: &str) -> String {
    format!("Failed to send reply to room {room_id}: {err}")
}
