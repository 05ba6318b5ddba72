//! src/stream/writer.rs
//! Block-buffering encrypting writer

use std::io::{self, Write};
use std::marker::PhantomData;

use cipher::block_padding::Padding;
use cipher::consts::U16;
use cipher::generic_array::GenericArray;
use cipher::{BlockEncryptMut, BlockSizeUser};
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

use crate::aliases::Block16;
use crate::consts::BLOCK_SIZE;
use crate::error::KdbcryptError;

/// Encrypts everything written to it into `sink`, one 16-byte block at a time.
///
/// Call [`finish`](Self::finish) to write the padded final block. Dropping the
/// writer without finishing loses the buffered tail and leaves an unreadable
/// ciphertext.
///
/// A ciphertext block the sink refused stays queued and is retried by the
/// next `write`, `flush` or `finish`, so a failed sink write never loses
/// accepted input.
pub struct CbcWriter<W, M, P> {
    sink: W,
    mode: M,
    // plaintext of the block being assembled
    buffer: Zeroizing<Block16>,
    filled: usize,
    // encrypted block not yet fully handed to the sink
    queued: Block16,
    queued_pos: usize,
    queued_len: usize,
    written: u64,
    _padding: PhantomData<P>,
}

impl<W, M, P> CbcWriter<W, M, P>
where
    W: Write,
    M: BlockEncryptMut + BlockSizeUser<BlockSize = U16>,
    P: Padding<U16>,
{
    /// Wrap `sink` with an already-initialized block mode (cipher + IV).
    pub fn new(sink: W, mode: M) -> Self {
        Self {
            sink,
            mode,
            buffer: Zeroizing::new([0u8; BLOCK_SIZE]),
            filled: 0,
            queued: [0u8; BLOCK_SIZE],
            queued_pos: 0,
            queued_len: 0,
            written: 0,
            _padding: PhantomData,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Ciphertext bytes emitted to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Pad and encrypt the final block, flush, and hand back the sink.
    ///
    /// The sink itself is not closed. An input that already ends on a block
    /// boundary gets a full block of padding.
    pub fn finish(mut self) -> Result<W, KdbcryptError> {
        self.drain()?;
        let mut block = GenericArray::from(*self.buffer);
        P::pad(&mut block, self.filled);
        self.encrypt_into_queue(&mut block);
        self.drain()?;
        self.sink.flush()?;

        trace!(bytes = self.written, "encrypting writer finished");
        Ok(self.sink)
    }

    fn encrypt_into_queue(&mut self, block: &mut GenericArray<u8, U16>) {
        self.mode.encrypt_block_mut(block);
        self.queued.copy_from_slice(block.as_slice());
        self.queued_pos = 0;
        self.queued_len = BLOCK_SIZE;
        self.buffer.zeroize();
        self.filled = 0;
    }

    /// Hand the queued ciphertext block to the sink.
    fn drain(&mut self) -> io::Result<()> {
        while self.queued_pos < self.queued_len {
            match self.sink.write(&self.queued[self.queued_pos..self.queued_len]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "sink accepted no ciphertext",
                    ))
                }
                Ok(n) => {
                    self.queued_pos += n;
                    self.written += n as u64;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        self.queued_pos = 0;
        self.queued_len = 0;
        Ok(())
    }
}

impl<W, M, P> Write for CbcWriter<W, M, P>
where
    W: Write,
    M: BlockEncryptMut + BlockSizeUser<BlockSize = U16>,
    P: Padding<U16>,
{
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        // nothing of `data` is taken while an earlier block is still stuck
        self.drain()?;

        let mut consumed = 0;
        while consumed < data.len() {
            let take = (data.len() - consumed).min(BLOCK_SIZE - self.filled);
            self.buffer[self.filled..self.filled + take]
                .copy_from_slice(&data[consumed..consumed + take]);
            self.filled += take;
            consumed += take;

            if self.filled == BLOCK_SIZE {
                let mut block = GenericArray::from(*self.buffer);
                self.encrypt_into_queue(&mut block);
                if self.drain().is_err() {
                    // the block is queued; the error resurfaces on the next call
                    return Ok(consumed);
                }
            }
        }
        Ok(consumed)
    }

    /// Writes any queued ciphertext and flushes the sink. A partially filled
    /// block stays buffered until more data arrives or the writer is finished.
    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::CbcEncryptor;
    use cipher::block_padding::Pkcs7;
    use cipher::{InnerIvInit, KeyInit};
    use kuznyechik::Kuznyechik;

    fn writer<W: Write>(sink: W) -> CbcWriter<W, CbcEncryptor, Pkcs7> {
        let inner = Kuznyechik::new(GenericArray::from_slice(&[1u8; 32]));
        let mode = CbcEncryptor::inner_iv_init(inner, GenericArray::from_slice(&[2u8; 16]));
        CbcWriter::new(sink, mode)
    }

    /// Fails the next `failures` writes, then behaves like a `Vec`.
    struct Flaky {
        out: Vec<u8>,
        failures: usize,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::new(io::ErrorKind::Other, "sink hiccup"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_after_accepting_input_reports_progress() {
        let data: Vec<u8> = (0..40u8).collect();

        let mut w = writer(Flaky { out: Vec::new(), failures: 1 });
        // the first full block is encrypted but the sink refuses it
        assert_eq!(w.write(&data).unwrap(), 16);
        assert_eq!(w.bytes_written(), 0);

        // the queued block goes out before more input is taken
        assert_eq!(w.write(&data[16..]).unwrap(), 24);
        let out = w.finish().unwrap().out;

        let mut reference = writer(Vec::new());
        reference.write_all(&data).unwrap();
        assert_eq!(out, reference.finish().unwrap());
    }

    #[test]
    fn persistent_sink_failure_surfaces_without_consuming() {
        let mut w = writer(Flaky { out: Vec::new(), failures: 2 });
        assert_eq!(w.write(&[7u8; 16]).unwrap(), 16);

        // the queued block is retried first and fails again
        let err = w.write(&[8u8; 4]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);

        w.flush().unwrap();
        assert_eq!(w.get_ref().out.len(), 16);
    }

    #[test]
    fn output_is_padded_to_next_block() {
        for (len, expected) in [(0, 16), (1, 16), (15, 16), (16, 32), (17, 32), (1000, 1008)] {
            let mut w = writer(Vec::new());
            w.write_all(&vec![0xEEu8; len]).unwrap();
            let out = w.finish().unwrap();
            assert_eq!(out.len(), expected, "plaintext length {len}");
        }
    }

    #[test]
    fn chunking_does_not_change_ciphertext() {
        let data: Vec<u8> = (0..100u8).collect();

        let mut whole = writer(Vec::new());
        whole.write_all(&data).unwrap();
        let whole = whole.finish().unwrap();

        let mut pieces = writer(Vec::new());
        for chunk in data.chunks(7) {
            pieces.write_all(chunk).unwrap();
        }
        let pieces = pieces.finish().unwrap();

        assert_eq!(whole, pieces);
    }

    #[test]
    fn full_blocks_are_written_eagerly() {
        let mut w = writer(Vec::new());
        w.write_all(&[0u8; 20]).unwrap();
        assert_eq!(w.get_ref().len(), 16);
        assert_eq!(w.bytes_written(), 16);
        let out = w.finish().unwrap();
        assert_eq!(out.len(), 32);
    }

    #[test]
    fn finish_returns_existing_sink_contents() {
        let w = writer(b"header".to_vec());
        let out = w.finish().unwrap();
        assert_eq!(&out[..6], b"header");
        assert_eq!(out.len(), 6 + 16);
    }
}
