//! Value transformations applied to projected properties.

use serde_json::Value;

use crate::error::{VaultError, VaultResult};

/// The only transformation the fake vault supports.
pub const MASK: &str = "mask";

/// Applies `transformation` to a value of the given data type.
///
/// Non-string values pass through unchanged.
pub fn transform(data_type: &str, transformation: &str, value: &Value) -> VaultResult<Value> {
    if transformation != MASK {
        return Err(VaultError::bad_request(format!(
            "Unsupported transformation '{transformation}'"
        ))
        .with_param("transformation", transformation));
    }

    let Some(text) = value.as_str() else {
        return Ok(value.clone());
    };

    let masked = match data_type {
        "EMAIL" => mask_email(text),
        "SSN" => mask_ssn(text),
        _ => mask_keep_last_digits(text, 4),
    };
    Ok(Value::String(masked))
}

/// `john@somemail.com` becomes `j***@somemail.com`.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

/// `123-12-1234` becomes `***-**-1234`.
fn mask_ssn(ssn: &str) -> String {
    let digits: Vec<char> = ssn.chars().filter(char::is_ascii_digit).collect();
    let last: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("***-**-{last}")
}

/// Replaces every digit but the last `keep` with `*`.
fn mask_keep_last_digits(text: &str, keep: usize) -> String {
    let total = text.chars().filter(char::is_ascii_digit).count();
    let mut seen = 0;
    text.chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen + keep > total {
                    return c;
                }
                return '*';
            }
            c
        })
        .collect()
}
