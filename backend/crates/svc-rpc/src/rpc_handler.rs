/// Return `message` unchanged.
pub fn echo(message: Option<String>) -> Option<String> {
    message
}

/// Upper-case `message`. Absent input stays absent; this never fails.
pub fn upper_case(message: Option<String>) -> Option<String> {
    message.map(|m| m.to_uppercase())
}
