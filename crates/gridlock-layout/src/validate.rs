//! Layout validation and JSON ingestion.
//!
//! Malformed coordinates are rejected, never coerced: a `NaN` position would
//! poison every collision test that touches it.

use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LayoutError;
use crate::item::LayoutItem;
use crate::sync::GridPlacement;

const FIELDS: [&str; 4] = ["x", "y", "w", "h"];

/// Reject placements whose `x`, `y`, `w` or `h` is not a number.
pub fn validate_layout(items: &[GridPlacement], context: &str) -> Result<(), LayoutError> {
    items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| validate_placement(item, context, index))
}

pub(crate) fn validate_placement(
    item: &GridPlacement,
    context: &str,
    index: usize,
) -> Result<(), LayoutError> {
    let values = [item.x, item.y, item.w, item.h];
    match FIELDS.into_iter().zip(values).find(|(_, v)| v.is_nan()) {
        Some((field, _)) => Err(LayoutError::NotNumeric {
            context: context.to_string(),
            index,
            field,
        }),
        None => Ok(()),
    }
}

/// Reject JSON that is not an array of items with numeric `x`, `y`, `w`, `h`.
pub fn validate_layout_json(value: &Value, context: &str) -> Result<(), LayoutError> {
    let Some(items) = value.as_array() else {
        return Err(LayoutError::NotAnArray {
            context: context.to_string(),
        });
    };
    for (index, item) in items.iter().enumerate() {
        if let Some(field) = FIELDS
            .into_iter()
            .find(|field| !item.get(field).is_some_and(Value::is_number))
        {
            return Err(LayoutError::NotNumeric {
                context: context.to_string(),
                index,
                field,
            });
        }
    }
    Ok(())
}

/// A serialized item: an id plus a fractional placement.
#[derive(Deserialize)]
struct SerializedItem {
    id: String,
    #[serde(flatten)]
    placement: GridPlacement,
}

/// Parse a serialized layout.
///
/// The JSON is validated first so a bad coordinate is reported by index and
/// field rather than as a generic deserialization error. Fractional
/// coordinates are rounded half-up. Ids must be unique.
pub fn parse_layout(json: &str) -> Result<Vec<LayoutItem>, LayoutError> {
    let value: Value = serde_json::from_str(json)?;
    validate_layout_json(&value, "parse_layout")?;
    let serialized: Vec<SerializedItem> = serde_json::from_value(value)?;
    let items: Vec<LayoutItem> = serialized
        .into_iter()
        .map(|item| item.placement.into_item(item.id))
        .collect();

    let mut seen = FxHashSet::default();
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(LayoutError::DuplicateId {
                id: item.id.clone(),
            });
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlock_core::GridRect;
    use serde_json::json;

    #[test]
    fn nan_is_rejected_with_index_and_field() {
        let items = [
            GridPlacement::new(0.0, 0.0, 1.0, 1.0),
            GridPlacement::new(0.0, 0.0, f64::NAN, f64::NAN),
        ];
        let err = validate_layout(&items, "children").unwrap_err();
        assert_eq!(
            err,
            LayoutError::NotNumeric {
                context: "children".to_string(),
                index: 1,
                field: "w",
            }
        );
    }

    #[test]
    fn finite_and_infinite_values_pass() {
        let items = [GridPlacement::new(0.0, f64::INFINITY, 1.0, 1.0)];
        assert!(validate_layout(&items, "children").is_ok());
    }

    #[test]
    fn json_must_be_array() {
        let err = validate_layout_json(&json!({"x": 1}), "ctx").unwrap_err();
        assert_eq!(
            err,
            LayoutError::NotAnArray {
                context: "ctx".to_string()
            }
        );
    }

    #[test]
    fn json_field_must_be_number() {
        let value = json!([
            {"id": "a", "x": 0, "y": 0, "w": 1, "h": 1},
            {"id": "b", "x": 0, "y": "2", "w": 1, "h": 1},
        ]);
        let err = validate_layout_json(&value, "ctx").unwrap_err();
        assert_eq!(err.to_string(), "ctx: layout[1].y must be a number");

        let missing = json!([{"id": "a", "x": 0, "y": 0, "w": 1}]);
        let err = validate_layout_json(&missing, "ctx").unwrap_err();
        assert_eq!(err.to_string(), "ctx: layout[0].h must be a number");
    }

    #[test]
    fn parse_round_trips_items() {
        let items = parse_layout(
            r#"[{"id":"a","x":0,"y":0,"w":2,"h":1,"static":true},
                {"id":"b","x":2,"y":0,"w":2,"h":3,"minW":1,"resizeHandles":["se","w"]}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_static);
        assert_eq!(items[1].min_w, Some(1));
        assert_eq!(items[1].resize_handles.as_deref().map(<[_]>::len), Some(2));
    }

    #[test]
    fn parse_rejects_duplicates_and_garbage() {
        let dup = r#"[{"id":"a","x":0,"y":0,"w":1,"h":1},{"id":"a","x":1,"y":0,"w":1,"h":1}]"#;
        assert_eq!(
            parse_layout(dup).unwrap_err(),
            LayoutError::DuplicateId { id: "a".to_string() }
        );
        assert!(matches!(parse_layout("[{"), Err(LayoutError::Json { .. })));
        assert!(matches!(
            parse_layout(r#"[{"x":0,"y":0,"w":1,"h":1}]"#),
            Err(LayoutError::Json { .. })
        ));
    }

    #[test]
    fn parse_rounds_fractional_coordinates() {
        let items =
            parse_layout(r#"[{"id":"a","x":1.5,"y":2.49,"w":2.5,"h":0.5,"minH":1}]"#).unwrap();
        assert_eq!(items[0].rect(), GridRect::new(2, 2, 3, 1));
        assert_eq!(items[0].min_h, Some(1));
    }

    #[test]
    fn parse_saturates_out_of_range_coordinates() {
        let items = parse_layout(r#"[{"id":"a","x":0,"y":1e12,"w":1,"h":1}]"#).unwrap();
        assert_eq!(items[0].y, i32::MAX);
    }
}
