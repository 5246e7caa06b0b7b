use std::collections::BTreeMap;

use crate::error::{Result, RidlError};

use super::introspect::TypeDescriptor;

const TRANSACTION_PREFIX: &str = "TRANSACTION_";
const TRANSACTION_SUFFIX: &str = "_TRANSACTION";

/// Whether a static field name follows one of the two transaction
/// constant conventions.
pub fn looks_like_transaction_code(name: &str) -> bool {
    name.starts_with(TRANSACTION_PREFIX) || name.ends_with(TRANSACTION_SUFFIX)
}

/// Extract the transaction dispatch table from a stub type.
///
/// Keeps exactly the declared static int fields whose names follow a
/// transaction convention, keyed by constant value. The BTreeMap keeps
/// codes in ascending order, which generally reflects declaration order
/// and makes output deterministic. Constants are typically non-public,
/// so the read always requests the accessibility override.
pub fn extract_transactions(stub: &TypeDescriptor) -> Result<BTreeMap<i64, String>> {
    let mut table = BTreeMap::new();

    for field in &stub.fields {
        if field.field_type != "int" || !looks_like_transaction_code(&field.name) {
            continue;
        }

        let code = match field.read(true) {
            Some(value) => value,
            None => continue,
        };

        if let Some(existing) = table.insert(code, field.name.clone()) {
            // Two constants sharing a dispatch code means the source data
            // is broken; there is no sound tie-break.
            return Err(RidlError::DuplicateCode {
                code,
                first: existing,
                second: field.name.clone(),
            });
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::introspect::FieldDescriptor;

    fn int_field(name: &str, value: i64) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            field_type: "int".to_string(),
            value,
            accessible: false,
        }
    }

    fn stub_with(fields: Vec<FieldDescriptor>) -> TypeDescriptor {
        TypeDescriptor {
            canonical_name: "android.os.IVibratorService$Stub".to_string(),
            fields,
            methods: vec![],
        }
    }

    #[test]
    fn test_keeps_only_transaction_constants_in_code_order() {
        let stub = stub_with(vec![
            int_field("TRANSACTION_cancelVibrate", 3),
            int_field("TRANSACTION_vibrate", 1),
            FieldDescriptor {
                name: "DESCRIPTOR_HASH".to_string(),
                field_type: "int".to_string(),
                value: 99,
                accessible: true,
            },
            FieldDescriptor {
                name: "TRANSACTION_label".to_string(),
                field_type: "java.lang.String".to_string(),
                value: 0,
                accessible: true,
            },
            int_field("VIBRATE_PATTERN_TRANSACTION", 2),
        ]);

        let table = extract_transactions(&stub).unwrap();
        let entries: Vec<(i64, &str)> = table.iter().map(|(c, n)| (*c, n.as_str())).collect();

        assert_eq!(
            entries,
            vec![
                (1, "TRANSACTION_vibrate"),
                (2, "VIBRATE_PATTERN_TRANSACTION"),
                (3, "TRANSACTION_cancelVibrate"),
            ]
        );
    }

    #[test]
    fn test_duplicate_code_is_an_error() {
        let stub = stub_with(vec![
            int_field("TRANSACTION_first", 7),
            int_field("TRANSACTION_second", 7),
        ]);

        match extract_transactions(&stub) {
            Err(RidlError::DuplicateCode { code, first, second }) => {
                assert_eq!(code, 7);
                assert_eq!(first, "TRANSACTION_first");
                assert_eq!(second, "TRANSACTION_second");
            }
            other => panic!("expected DuplicateCode, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_stub_yields_empty_table() {
        let table = extract_transactions(&stub_with(vec![])).unwrap();
        assert!(table.is_empty());
    }
}
