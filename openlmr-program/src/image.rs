use anyhow::{anyhow, Result};
use embedded_storage::nor_flash::{ErrorType, ReadNorFlash};
use embedded_storage_inmemory::MemFlash;
use log::debug;
use openlmr_codeplug::LmrCodeplug;
use sequential_storage::{cache::NoCache, map::store_item};

pub const IMAGE_SIZE: usize = 65536;

const FLASH_ERASE_SIZE: usize = 4096;

/// In-memory stand-in for the radio's codeplug flash.
pub struct WrappedFlash {
    inner: MemFlash<IMAGE_SIZE, FLASH_ERASE_SIZE, 1>,
}

impl WrappedFlash {
    pub fn new() -> WrappedFlash {
        WrappedFlash {
            inner: MemFlash::new(0xFF),
        }
    }

    pub fn image(&self) -> &[u8] {
        &self.inner.mem
    }
}

impl ErrorType for WrappedFlash {
    type Error = <MemFlash<IMAGE_SIZE, FLASH_ERASE_SIZE, 1> as ErrorType>::Error;
}

impl embedded_storage_async::nor_flash::ReadNorFlash for WrappedFlash {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(offset, bytes)
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

impl embedded_storage_async::nor_flash::NorFlash for WrappedFlash {
    const WRITE_SIZE: usize = 1;

    const ERASE_SIZE: usize = FLASH_ERASE_SIZE;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        let bytes = vec![0xFF; (to - from) as usize];
        self.inner.program(from, &bytes)
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.inner.program(offset, bytes)
    }
}

/// Stores every channel of the codeplug into a fresh flash image.
pub async fn build_image(codeplug: &LmrCodeplug) -> Result<WrappedFlash> {
    let flash_range = 0..IMAGE_SIZE as u32;
    let mut flash = WrappedFlash::new();
    let mut data_buffer = [0u8; 1024];

    for channel in &codeplug.channels {
        store_item(
            &mut flash,
            flash_range.clone(),
            NoCache::new(),
            &mut data_buffer,
            channel,
        )
        .await
        .map_err(|err| {
            anyhow!(
                "failed to store channel {:?} ({}): {:?}",
                channel.num,
                channel.name,
                err
            )
        })?;
        debug!("stored channel {:?} {}", channel.num, channel.name);
    }

    Ok(flash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use openlmr_codeplug::channel::LmrChannel;
    use sequential_storage::map::fetch_item;

    fn channel(num: u16, freq: u32, name: &str) -> LmrChannel {
        LmrChannel {
            num: Some(num),
            freq,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn stored_channels_read_back() {
        let codeplug = LmrCodeplug {
            channels: vec![
                channel(0, 146_520_000, "Calling"),
                channel(1, 446_000_000, "UHF Calling"),
            ],
            zones: vec![],
        };
        let mut flash = build_image(&codeplug).await.unwrap();
        assert_eq!(flash.image().len(), IMAGE_SIZE);

        let mut data_buffer = [0u8; 1024];
        let stored: Option<LmrChannel> = fetch_item(
            &mut flash,
            0..IMAGE_SIZE as u32,
            NoCache::new(),
            &mut data_buffer,
            1,
        )
        .await
        .unwrap();
        assert_eq!(stored.unwrap().name, "UHF Calling");
    }

    #[tokio::test]
    async fn unnumbered_channels_are_refused() {
        let mut unnumbered = channel(0, 146_520_000, "Calling");
        unnumbered.num = None;
        let codeplug = LmrCodeplug {
            channels: vec![unnumbered],
            zones: vec![],
        };
        assert!(build_image(&codeplug).await.is_err());
    }
}
