//! Library side of the `entity-resolver` binary: logging setup and the
//! load/resolve/output pipeline.

pub mod logging;
pub mod pipeline;
