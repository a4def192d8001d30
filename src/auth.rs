//! Authentication: accounts, passwords, and token sessions
//!
//! Tokens are 32 random bytes, base64url encoded, and stored only as
//! SHA-256 hashes. Passwords are stored as salted SHA-256 hashes.

use sha2::{Digest, Sha256};

use crate::db::read;
use crate::error::{err, Result, StoreError};
use crate::roles::Role;
use crate::tx::transact;

/// Generate a cryptographically secure token (32 bytes, base64url encoded)
pub fn generate_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(err)?;
    Ok(base64url_encode(&bytes))
}

/// Hash token with SHA-256 for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Base64url encode without padding
fn base64url_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
    let mut result = String::with_capacity((data.len() * 4 + 2) / 3);
    for chunk in data.chunks(3) {
        let n = match chunk.len() {
            3 => ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8) | (chunk[2] as u32),
            2 => ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8),
            1 => (chunk[0] as u32) << 16,
            _ => unreachable!(),
        };
        result.push(ALPHABET[((n >> 18) & 0x3F) as usize] as char);
        result.push(ALPHABET[((n >> 12) & 0x3F) as usize] as char);
        if chunk.len() > 1 { result.push(ALPHABET[((n >> 6) & 0x3F) as usize] as char); }
        if chunk.len() > 2 { result.push(ALPHABET[(n & 0x3F) as usize] as char); }
    }
    result
}

/// Hex encode
mod hex {
    pub fn encode(data: impl AsRef<[u8]>) -> String {
        data.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

fn current_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate random salt (16 bytes, hex encoded)
fn generate_salt() -> Result<String> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).map_err(err)?;
    Ok(hex::encode(bytes))
}

/// Hash password with salt
fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

// ============================================================================
// Accounts
// ============================================================================

/// Register (or replace) an account with a role
pub fn register_user(email: &str, password: &str, role: Role) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(StoreError::Validation("email and password are mandatory".into()));
    }
    let salt = generate_salt()?;
    let hash = hash_password(&salt, password);
    let value = format!("{}|{}|{}", salt, hash, role.as_str());
    transact(|tx| tx.put_user(email, &value))
}

/// Look up an account's role
pub fn user_role(email: &str) -> Result<Role> {
    read(|d, tx| {
        let value = d.users.get(tx, email).map_err(err)?
            .ok_or_else(|| StoreError::Authentication("unknown account".into()))?;
        let role = value.rsplit('|').next()
            .ok_or_else(|| StoreError::Storage("corrupted account record".into()))?;
        Role::parse(role)
    })
}

/// Verify a password against the stored salted hash
pub fn verify_password(email: &str, password: &str) -> Result<bool> {
    read(|d, tx| {
        let value = match d.users.get(tx, email).map_err(err)? {
            Some(v) => v,
            None => return Ok(false),
        };
        let parts: Vec<&str> = value.split('|').collect();
        if parts.len() != 3 {
            return Err(StoreError::Storage("corrupted account record".into()));
        }
        Ok(parts[1] == hash_password(parts[0], password))
    })
}

// ============================================================================
// Sessions
// ============================================================================

/// Create a session, returns the bearer token
pub fn create_session(email: &str, ttl_secs: Option<u64>) -> Result<String> {
    let token = generate_token()?;
    let hash = hash_token(&token);
    let now = current_epoch();
    let expires = ttl_secs.map(|t| now + t * 1000).unwrap_or(0);
    let value = format!("{}|{}|{}", email, now, expires);
    transact(|tx| tx.put_session(&hash, &value))?;
    Ok(token)
}

/// Validate a token, returns the account email
pub fn validate_session(token: &str) -> Result<String> {
    let hash = hash_token(token);
    read(|d, tx| {
        let value = d.sessions.get(tx, &hash).map_err(err)?
            .ok_or_else(|| StoreError::Authentication("invalid token".into()))?;
        let parts: Vec<&str> = value.split('|').collect();
        if parts.len() != 3 {
            return Err(StoreError::Storage("corrupted session record".into()));
        }
        let expires: u64 = parts[2].parse().unwrap_or(0);
        // 0 = never expires
        if expires > 0 && expires < current_epoch() {
            return Err(StoreError::Authentication("token expired".into()));
        }
        Ok(parts[0].to_string())
    })
}

/// Validate a token and resolve the account's role
pub fn current_user(token: &str) -> Result<(String, Role)> {
    let email = validate_session(token)?;
    let role = user_role(&email)?;
    Ok((email, role))
}

/// Login with email and password, returns a fresh token
pub fn login(email: &str, password: &str) -> Result<String> {
    if !verify_password(email, password)? {
        return Err(StoreError::Authentication("invalid credentials".into()));
    }
    create_session(email, None)
}

/// Revoke a session by token; false if the token was not active
pub fn logout(token: &str) -> Result<bool> {
    let hash = hash_token(token);
    transact(|tx| tx.remove_session(&hash))
}
