// src/stream/mod.rs

//! Streaming CBC adapters.
//!
//! [`CbcWriter`] buffers plaintext into whole blocks and pads the last one on
//! [`finish`](CbcWriter::finish); [`CbcReader`] decrypts whole blocks and strips
//! the padding when the source runs dry. Both are generic over any block mode
//! with 16-byte blocks and any [`Padding`](cipher::block_padding::Padding) strategy.

pub(crate) mod reader;
pub(crate) mod writer;

pub use reader::CbcReader;
pub use writer::CbcWriter;
