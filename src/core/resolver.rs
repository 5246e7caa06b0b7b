use crate::config::Config;
use crate::error::{Result, RidlError};

/// Derive the candidate method name for a transaction constant.
///
/// `TRANSACTION_X` constants carry the method name verbatim. The older
/// `X_TRANSACTION` style (IActivityManager and friends) is SHOUTING_CASE
/// and gets camel-cased; the quirks table then patches the handful of
/// constants whose mechanical transformation does not match the declared
/// method name.
pub fn method_name_for_transaction(
    config: &Config,
    service_name: &str,
    constant_name: &str,
) -> Result<String> {
    if let Some(name) = constant_name.strip_prefix("TRANSACTION_") {
        return Ok(name.to_string());
    }

    if let Some(shouting) = constant_name.strip_suffix("_TRANSACTION") {
        let mut name = String::new();

        for part in shouting.split('_') {
            if name.is_empty() {
                name.push_str(&part.to_lowercase());
            } else {
                let mut chars = part.chars();
                if let Some(first) = chars.next() {
                    name.push(first);
                    name.push_str(&chars.as_str().to_lowercase());
                }
            }
        }

        if let Some(override_name) = config.quirk_override(service_name, &name) {
            return Ok(override_name.to_string());
        }

        return Ok(name);
    }

    Err(RidlError::InvalidTransactionName(constant_name.to_string()))
}
