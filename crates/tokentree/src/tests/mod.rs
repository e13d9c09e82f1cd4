mod arbitrary;
mod extract_bad;
mod extract_good;
pub(crate) mod utils;
