use crate::error::AuthError;

/// Checks `plain` against a bcrypt hash. A malformed hash is a mismatch.
pub fn verify(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash could not be parsed");
            false
        }
    }
}

pub fn hash(plain: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(plain, cost).map_err(|e| AuthError::HashingFailure(e.to_string()))
}

/// Cost factor embedded in a `$2b$<cost>$...` hash.
pub fn cost_of(hash: &str) -> Option<u32> {
    hash.split('$').nth(2)?.parse().ok()
}

/// A throwaway hash with the same cost as `stored`, checked in place of a
/// real one when the username is unknown so both rejections take as long.
pub fn decoy_hash(stored: &str) -> Result<String, AuthError> {
    let cost = cost_of(stored)
        .filter(|c| (4..=31).contains(c))
        .unwrap_or(bcrypt::DEFAULT_COST);
    hash("decoy-password-never-matches", cost)
}

/// Runs [`verify`] on the blocking pool; bcrypt is deliberately slow.
pub async fn verify_blocking(plain: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify(&plain, &hash))
        .await
        .map_err(|e| AuthError::HashingFailure(e.to_string()))
}
