// Report exporters. Both run inline in the request that triggers them and
// return the finished document as bytes; nothing is persisted.

pub mod csv;
pub mod pdf;
