//! Эвристика разбиения текста продавца на каноническое имя и место.

const PAYPAL_PREFIX: &str = "PAYPAL";
const PAYPAL_MARKER: &str = "PAYPAL *";

/// Имя продавца и (опционально) место
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorInfo {
    pub name: String,
    pub location: Option<String>,
}

/// Делит текст продавца на имя и место. Правила проверяются по порядку:
/// - `PAYPAL...` - имя `PayPal`, место - текст после запятой, следующей за `PAYPAL *`;
/// - содержит `AMZN`/`AMAZON` - имя `Amazon`, без места;
/// - есть запятая - делим по последней запятой;
/// - иначе весь текст - имя.
pub fn split_vendor(text: &str) -> VendorInfo {
    let text = text.trim();

    if text.starts_with(PAYPAL_PREFIX) {
        return VendorInfo {
            name: "PayPal".to_string(),
            location: paypal_location(text),
        };
    }

    if text.contains("AMZN") || text.contains("AMAZON") {
        return VendorInfo {
            name: "Amazon".to_string(),
            location: None,
        };
    }

    if let Some((name, location)) = text.rsplit_once(',') {
        return VendorInfo {
            name: name.trim().to_string(),
            location: Some(location.trim().to_string()),
        };
    }

    VendorInfo {
        name: text.to_string(),
        location: None,
    }
}

/// `PAYPAL *shop, 35314369001` -> `35314369001`
fn paypal_location(text: &str) -> Option<String> {
    let (_, after_marker) = text.split_once(PAYPAL_MARKER)?;
    let (_, location) = after_marker.split_once(',')?;
    let location = location.trim();

    if location.is_empty() {
        None
    } else {
        Some(location.to_string())
    }
}
