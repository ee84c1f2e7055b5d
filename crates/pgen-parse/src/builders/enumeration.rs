use pgen_core::{Enumeration, Error, Result};
use serde_yaml::Mapping;

use crate::attrs::{key_str, optional_string, string_list};
use crate::options::DecodeOptions;

/// Build an enumeration from a declaration whose first attribute is `type: enum`.
///
/// Unknown attributes are ignored unless `opts.strict` is set.
pub fn build_enumeration(
    name: &str,
    attributes: &Mapping,
    opts: &DecodeOptions,
) -> Result<Enumeration> {
    let mut comment = None;
    let mut values = Vec::new();

    for (key, value) in attributes.iter().skip(1) {
        match key_str(key, name)? {
            "comment" => comment = optional_string(value, name, "comment")?,
            "value" => values = string_list(value, name, "value")?,
            other if opts.strict => {
                return Err(Error::UnknownAttribute {
                    entity: name.to_string(),
                    attribute: other.to_string(),
                });
            }
            other => {
                tracing::debug!(event = "attribute_ignored", entity = %name, attribute = %other);
            }
        }
    }

    if values.is_empty() {
        return Err(Error::MissingAttribute {
            entity: name.to_string(),
            reason: "enum must have at least one value".to_string(),
        });
    }

    Ok(Enumeration {
        name: name.to_string(),
        comment,
        values,
    })
}
