//! The single saved-product slot.

use serde_json::Value;

use super::KeyValueStore;
use crate::error::StorageError;
use crate::pricing::parse_competitor_pairs;
use crate::product::ProductInput;

pub const SAVED_PRODUCT_KEY: &str = "savedProductData";

/// Field used by the older saved shape for competitor data.
const LEGACY_COMPETITOR_KEY: &str = "competitor_pricing_data";

/// Saves the input, minus its image, over any previous value.
pub fn save_product<S: KeyValueStore>(store: &mut S, input: &ProductInput) -> Result<(), StorageError> {
    let json = serde_json::to_string(input).map_err(StorageError::Serialize)?;
    store.set(SAVED_PRODUCT_KEY, &json)?;
    tracing::info!(competitors = input.competitors.len(), "saved product data");
    Ok(())
}

pub fn has_saved_product<S: KeyValueStore>(store: &S) -> Result<bool, StorageError> {
    Ok(store.get(SAVED_PRODUCT_KEY)?.is_some())
}

/// Loads the saved input. `Ok(None)` means nothing was saved.
pub fn load_product<S: KeyValueStore>(store: &S) -> Result<Option<ProductInput>, StorageError> {
    let Some(raw) = store.get(SAVED_PRODUCT_KEY)? else {
        return Ok(None);
    };

    let value: Value =
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(StorageError::Corrupt("saved value is not an object".into()));
    };

    let has_list = matches!(object.get("competitors"), Some(Value::Array(_)));
    if !has_list {
        let legacy = match object.remove(LEGACY_COMPETITOR_KEY) {
            Some(Value::String(text)) => parse_competitor_pairs(&text),
            _ => Vec::new(),
        };
        tracing::debug!(count = legacy.len(), "converted legacy competitor data");
        let converted =
            serde_json::to_value(legacy).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        object.insert("competitors".into(), converted);
    }

    let input: ProductInput = serde_json::from_value(Value::Object(object))
        .map_err(|e| StorageError::Corrupt(e.to_string()))?;
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::CompetitorInput;
    use crate::store::MemoryStore;

    #[test]
    fn missing_slot_loads_nothing() {
        let store = MemoryStore::new();
        assert!(!has_saved_product(&store).unwrap());
        assert!(load_product(&store).unwrap().is_none());
    }

    #[test]
    fn legacy_string_becomes_rows() {
        let mut store = MemoryStore::new();
        store
            .set(
                SAVED_PRODUCT_KEY,
                r#"{"price":"4999","competitor_pricing_data":"Takealot: 5500, Evetech: 5150"}"#,
            )
            .unwrap();
        let input = load_product(&store).unwrap().unwrap();
        assert_eq!(
            input.competitors,
            vec![
                CompetitorInput::new("Takealot", "5500"),
                CompetitorInput::new("Evetech", "5150"),
            ]
        );
        assert_eq!(input.price, "4999");
    }

    #[test]
    fn structured_list_wins_over_legacy_string() {
        let mut store = MemoryStore::new();
        store
            .set(
                SAVED_PRODUCT_KEY,
                r#"{"competitors":[{"name":"A","price":"1"}],"competitor_pricing_data":"B: 2"}"#,
            )
            .unwrap();
        let input = load_product(&store).unwrap().unwrap();
        assert_eq!(input.competitors, vec![CompetitorInput::new("A", "1")]);
    }

    #[test]
    fn garbage_is_corrupt() {
        let mut store = MemoryStore::new();
        store.set(SAVED_PRODUCT_KEY, "{not json").unwrap();
        assert!(matches!(load_product(&store), Err(StorageError::Corrupt(_))));

        store.set(SAVED_PRODUCT_KEY, "[1,2]").unwrap();
        assert!(matches!(load_product(&store), Err(StorageError::Corrupt(_))));

        store.set(SAVED_PRODUCT_KEY, r#"{"competitors":"oops","price":7}"#).unwrap();
        assert!(matches!(load_product(&store), Err(StorageError::Corrupt(_))));
    }
}
