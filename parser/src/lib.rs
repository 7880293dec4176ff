pub mod error;
pub mod model;
pub mod german;
pub mod vendor;
pub mod normalize;
pub mod dkb;
pub mod serialization;

pub use crate::model::{
    Direction, ParseMetadata, ParseResult, ParseWarning, ParsedTransaction, IS_TRANSFER_KEY,
    RECEIPT_DATE_KEY,
};
pub use crate::dkb::{DkbStatement, looks_like_dkb_statement, parse_dkb_statement};
pub use crate::error::ParseError;
pub use crate::normalize::flatten_text;
pub use crate::vendor::{VendorInfo, split_vendor};
