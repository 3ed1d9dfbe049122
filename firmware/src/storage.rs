use defmt::{error, info};
use thrust::hal::NvStorage;

use crate::board::FlashStorage;

// Last 128K sector of the STM32F411CE, never touched by the program image.
const SECTOR_OFFSET: u32 = 0x6_0000;
const SECTOR_SIZE: u32 = 0x2_0000;

// Erased flash reads 0xff, so anything but the marker counts as "not set".
const MARKER: u8 = 0xa5;
const CELL_SIZE: u32 = 4;

/// Boolean cells in a dedicated flash sector.
///
/// Every change erases the whole sector and with it every other cell; the
/// calibration flag is the only one kept there.
pub struct FlashCell {
    flash: FlashStorage,
}

impl FlashCell {
    pub fn new(flash: FlashStorage) -> Self {
        Self { flash }
    }

    fn offset(address: u16) -> u32 {
        SECTOR_OFFSET + u32::from(address) * CELL_SIZE
    }
}

impl NvStorage for FlashCell {
    fn read(&mut self, address: u16) -> bool {
        let mut buf = [0u8; CELL_SIZE as usize];
        match self.flash.blocking_read(Self::offset(address), &mut buf) {
            Ok(()) => buf[0] == MARKER,
            Err(e) => {
                error!("Failed to read flash cell {}: {}", address, e);
                false
            }
        }
    }

    fn write(&mut self, address: u16, value: bool) {
        if self.read(address) == value {
            return;
        }

        info!("Writing flash cell {} = {}", address, value);
        if let Err(e) = self
            .flash
            .blocking_erase(SECTOR_OFFSET, SECTOR_OFFSET + SECTOR_SIZE)
        {
            error!("Failed to erase flash sector: {}", e);
            return;
        }
        if value {
            let buf = [MARKER; CELL_SIZE as usize];
            if let Err(e) = self.flash.blocking_write(Self::offset(address), &buf) {
                error!("Failed to write flash cell {}: {}", address, e);
            }
        }
    }
}
