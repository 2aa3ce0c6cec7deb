//! TI DRV2605 haptic driver over async I2C.
//!
//! Drives an ERM motor in open-loop mode from the built-in effect library,
//! triggered over I2C.

use embedded_hal_async::i2c::I2c;

use crate::haptic::{HapticDriver, HapticError};

/// Fixed 7-bit bus address.
pub const DRV2605_ADDR: u8 = 0x5A;

mod reg {
    pub const STATUS: u8 = 0x00;
    pub const MODE: u8 = 0x01;
    pub const RTP_INPUT: u8 = 0x02;
    pub const LIBRARY: u8 = 0x03;
    pub const WAVESEQ1: u8 = 0x04;
    pub const WAVESEQ2: u8 = 0x05;
    pub const GO: u8 = 0x0C;
    pub const OVERDRIVE: u8 = 0x0D;
    pub const SUSTAIN_POS: u8 = 0x0E;
    pub const SUSTAIN_NEG: u8 = 0x0F;
    pub const BREAK: u8 = 0x10;
    pub const AUDIO_MAX: u8 = 0x13;
    pub const FEEDBACK: u8 = 0x1A;
    pub const CONTROL3: u8 = 0x1D;
}

/// Device ids reported in `STATUS[7:5]`: DRV2605 and DRV2605L.
const DEVICE_IDS: [u8; 2] = [3, 7];

const MODE_INTERNAL_TRIGGER: u8 = 0x00;
const LIBRARY_ERM_A: u8 = 1;
const FEEDBACK_LRA: u8 = 0x80;
const CONTROL3_ERM_OPEN_LOOP: u8 = 0x20;

/// A configured DRV2605 on an async I2C bus.
#[derive(Debug)]
pub struct Drv2605<I> {
    i2c: I,
}

impl<I: I2c> Drv2605<I> {
    /// Look for the chip on `i2c` and configure it for library playback.
    ///
    /// # Errors
    ///
    /// [`HapticError::Unavailable`] if nothing answers at [`DRV2605_ADDR`] or
    /// the device id is wrong, [`HapticError::Bus`] if configuration fails.
    pub async fn probe(i2c: I) -> Result<Self, HapticError> {
        let mut driver = Self { i2c };

        let status = driver
            .read_reg(reg::STATUS)
            .await
            .map_err(|_| HapticError::Unavailable)?;
        let id = status >> 5;
        if !DEVICE_IDS.contains(&id) {
            warn!("unexpected DRV2605 device id {}", id);
            return Err(HapticError::Unavailable);
        }

        driver.configure().await?;
        info!("DRV2605 ready (id {})", id);
        Ok(driver)
    }

    async fn configure(&mut self) -> Result<(), HapticError> {
        self.write_reg(reg::MODE, MODE_INTERNAL_TRIGGER).await?;
        self.write_reg(reg::RTP_INPUT, 0).await?;
        self.write_reg(reg::WAVESEQ1, 1).await?;
        self.write_reg(reg::WAVESEQ2, 0).await?;
        self.write_reg(reg::OVERDRIVE, 0).await?;
        self.write_reg(reg::SUSTAIN_POS, 0).await?;
        self.write_reg(reg::SUSTAIN_NEG, 0).await?;
        self.write_reg(reg::BREAK, 0).await?;
        self.write_reg(reg::AUDIO_MAX, 0x64).await?;
        self.write_reg(reg::LIBRARY, LIBRARY_ERM_A).await?;

        let feedback = self.read_reg(reg::FEEDBACK).await?;
        self.write_reg(reg::FEEDBACK, feedback & !FEEDBACK_LRA).await?;

        let control3 = self.read_reg(reg::CONTROL3).await?;
        self.write_reg(reg::CONTROL3, control3 | CONTROL3_ERM_OPEN_LOOP)
            .await
    }

    async fn read_reg(&mut self, reg: u8) -> Result<u8, HapticError> {
        let mut value = [0u8];
        self.i2c
            .write_read(DRV2605_ADDR, &[reg], &mut value)
            .await
            .map_err(|_| HapticError::Bus)?;
        Ok(value[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), HapticError> {
        self.i2c
            .write(DRV2605_ADDR, &[reg, value])
            .await
            .map_err(|_| HapticError::Bus)
    }

    /// Give back the bus.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> HapticDriver for Drv2605<I> {
    fn is_available(&self) -> bool {
        true
    }

    /// Queue `effect` as a one-step sequence and fire it.
    async fn play(&mut self, effect: u8) -> Result<(), HapticError> {
        self.write_reg(reg::WAVESEQ1, effect).await?;
        self.write_reg(reg::WAVESEQ2, 0).await?;
        self.write_reg(reg::GO, 1).await
    }
}
