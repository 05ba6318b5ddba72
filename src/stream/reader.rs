//! src/stream/reader.rs
//! Decrypting reader: holds back the last block until end of input to strip padding

use std::io::{self, Read};
use std::marker::PhantomData;
use std::mem;

use cipher::block_padding::Padding;
use cipher::consts::U16;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecryptMut, BlockSizeUser};
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

use crate::aliases::Block16;
use crate::consts::BLOCK_SIZE;
use crate::error::KdbcryptError;

/// Decrypts `source` block by block and strips the padding from the last block.
///
/// Errors raised by the codec itself (misaligned input, bad padding) surface
/// as `io::Error`s of kind `InvalidData` wrapping a [`KdbcryptError`];
/// converting them with `KdbcryptError::from` recovers the typed variant.
pub struct CbcReader<R, M, P> {
    source: R,
    mode: M,
    // ciphertext block being assembled from short reads
    pending: Zeroizing<Block16>,
    pending_len: usize,
    // last decrypted block; might be the padded final one
    held: Zeroizing<Block16>,
    has_held: bool,
    // plaintext ready to hand out
    ready: Zeroizing<Block16>,
    ready_pos: usize,
    ready_len: usize,
    state: State,
    _padding: PhantomData<P>,
}

impl<R, M, P> CbcReader<R, M, P>
where
    R: Read,
    M: BlockDecryptMut + BlockSizeUser<BlockSize = U16>,
    P: Padding<U16>,
{
    /// Wrap `source` with an already-initialized block mode (cipher + IV).
    pub fn new(source: R, mode: M) -> Self {
        Self {
            source,
            mode,
            pending: Zeroizing::new([0u8; BLOCK_SIZE]),
            pending_len: 0,
            held: Zeroizing::new([0u8; BLOCK_SIZE]),
            has_held: false,
            ready: Zeroizing::new([0u8; BLOCK_SIZE]),
            ready_pos: 0,
            ready_len: 0,
            state: State::Reading,
            _padding: PhantomData,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Decrypt the next block into `ready`, or unpad the held block at end of input.
    fn fill_ready(&mut self) -> Result<(), KdbcryptError> {
        loop {
            match self.source.read(&mut self.pending[self.pending_len..]) {
                Ok(0) => return self.finish_stream(),
                Ok(n) => {
                    self.pending_len += n;
                    if self.pending_len < BLOCK_SIZE {
                        continue;
                    }
                    self.pending_len = 0;

                    let mut block = GenericArray::from(*self.pending);
                    self.mode.decrypt_block_mut(&mut block);
                    let mut plain = [0u8; BLOCK_SIZE];
                    plain.copy_from_slice(&block);
                    block.as_mut_slice().zeroize();

                    let previous = mem::replace(&mut *self.held, plain);
                    plain.zeroize();
                    if self.has_held {
                        *self.ready = previous;
                        self.ready_pos = 0;
                        self.ready_len = BLOCK_SIZE;
                        return Ok(());
                    }
                    self.has_held = true;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(KdbcryptError::Io(err)),
            }
        }
    }

    fn finish_stream(&mut self) -> Result<(), KdbcryptError> {
        if self.pending_len != 0 {
            return Err(self.corrupt(Corruption::Misaligned));
        }
        if !self.has_held {
            // a padded stream always carries at least one block
            return Err(self.corrupt(Corruption::Padding));
        }
        self.has_held = false;

        let block = GenericArray::from(*self.held);
        self.held.zeroize();
        let Ok(plain) = P::unpad(&block) else {
            return Err(self.corrupt(Corruption::Padding));
        };
        self.state = State::Drained;
        self.ready[..plain.len()].copy_from_slice(plain);
        self.ready_pos = 0;
        self.ready_len = plain.len();

        trace!(tail = plain.len(), "decrypting reader reached end of input");
        Ok(())
    }

    fn corrupt(&mut self, corruption: Corruption) -> KdbcryptError {
        self.pending.zeroize();
        self.pending_len = 0;
        self.state = State::Corrupt(corruption);
        corruption.into()
    }
}

/// Where the reader stands once the source is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Drained,
    // sticky: every later read fails the same way
    Corrupt(Corruption),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corruption {
    Misaligned,
    Padding,
}

impl From<Corruption> for KdbcryptError {
    fn from(corruption: Corruption) -> Self {
        match corruption {
            Corruption::Misaligned => KdbcryptError::MisalignedCiphertext,
            Corruption::Padding => KdbcryptError::InvalidPadding,
        }
    }
}

impl<R, M, P> Read for CbcReader<R, M, P>
where
    R: Read,
    M: BlockDecryptMut + BlockSizeUser<BlockSize = U16>,
    P: Padding<U16>,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.ready_pos < self.ready_len {
                let n = buf.len().min(self.ready_len - self.ready_pos);
                buf[..n].copy_from_slice(&self.ready[self.ready_pos..self.ready_pos + n]);
                self.ready_pos += n;
                return Ok(n);
            }
            match self.state {
                State::Reading => self.fill_ready().map_err(KdbcryptError::into_io)?,
                State::Drained => return Ok(0),
                State::Corrupt(corruption) => {
                    return Err(KdbcryptError::from(corruption).into_io())
                }
            }
        }
    }
}
