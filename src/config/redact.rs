/// Mask a bearer token for diagnostic output. Short tokens are fully
/// masked; longer ones keep a four character prefix so two configured
/// environments can still be told apart in debug logs.
pub fn redact_token(token: &str) -> String {
    let chars = token.chars().count();
    if chars <= 8 {
        "[REDACTED]".to_string()
    } else {
        let prefix: String = token.chars().take(4).collect();
        format!("{}...({} chars)", prefix, chars)
    }
}
