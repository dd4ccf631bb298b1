use std::{fs, path::Path};

use log::info;

use crate::compression::decompress::{decompress_block, DecodedBlock, MAX_OUTPUT};
use crate::error::Result;

/// A ROM image (or any other file) holding compressed blocks at known offsets.
#[derive(Debug, Clone, Default)]
pub struct Rom {
    data: Vec<u8>,
}

impl Rom {
    /// Read a whole image from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        info!(
            "Loaded {} bytes from {}.",
            data.len(),
            path.as_ref().display()
        );
        Ok(Self { data })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode the block stored at `offset`.
    pub fn decompress_at(&self, offset: usize) -> Result<Vec<u8>> {
        self.block_at(offset, MAX_OUTPUT).map(|block| block.data)
    }

    /// Decode the block stored at `offset`, also reporting how many bytes it takes up in
    /// the image.
    pub fn block_at(&self, offset: usize, capacity: usize) -> Result<DecodedBlock> {
        decompress_block(&self.data, offset, capacity)
    }
}

impl From<Vec<u8>> for Rom {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod test {
    use super::Rom;
    use crate::compression::compress::compress;
    use crate::error::Error;

    #[test]
    fn block_at_offset_test() {
        let block = compress(b"ABABABABAB and then some").unwrap();
        let mut image = vec![0x55; 0x100];
        image.extend_from_slice(&block);
        image.extend_from_slice(&[0x55; 16]);
        let rom = Rom::from(image);

        let decoded = rom.block_at(0x100, 0x10000).unwrap();
        assert_eq!(decoded.data, b"ABABABABAB and then some");
        assert_eq!(decoded.consumed, block.len());
        assert_eq!(rom.decompress_at(0x100).unwrap(), decoded.data);
    }

    #[test]
    fn empty_rom_test() {
        let rom = Rom::default();
        assert!(rom.is_empty());
        assert!(matches!(
            rom.decompress_at(0),
            Err(Error::OffsetOutOfRange { offset: 0, size: 0 })
        ));
    }
}
