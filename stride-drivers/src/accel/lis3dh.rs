//! LIS3DH accelerometer (I2C)
//!
//! The watch only needs the axis along the forearm. The part is run in
//! high-resolution mode at ±4 g, where output is 12 bits left-justified
//! in a 16-bit register pair and one LSB is 2 mg.
//!
//! # Register Access
//!
//! Multi-byte reads set the MSB of the sub-address to auto-increment:
//! ```text
//! START | addr+W | 0x80|reg | RESTART | addr+R | data... | STOP
//! ```

use embedded_hal_async::i2c::I2c;
use stride_core::config::SampleRate;

/// LIS3DH register addresses
pub mod reg {
    /// Device identification (reads 0x33)
    pub const WHO_AM_I: u8 = 0x0F;
    /// Data rate and axis enable
    pub const CTRL_REG1: u8 = 0x20;
    /// Block update, full scale, resolution
    pub const CTRL_REG4: u8 = 0x23;
    /// X axis low byte; Y and Z follow
    pub const OUT_X_L: u8 = 0x28;
    /// Y axis low byte
    pub const OUT_Y_L: u8 = 0x2A;
}

/// Default I2C address (SA0 tied low)
pub const DEFAULT_ADDRESS: u8 = 0x18;

/// Expected WHO_AM_I value
pub const DEVICE_ID: u8 = 0x33;

/// Sub-address auto-increment flag
const AUTO_INCREMENT: u8 = 0x80;

/// X, Y and Z enabled
const AXES_ENABLED: u8 = 0b0000_0111;

/// BDU=1, FS=±4 g, HR=1
const CTRL_REG4_VALUE: u8 = 0b1001_1000;

/// Milli-g per LSB at ±4 g in high-resolution mode
const MG_PER_LSB: i16 = 2;

/// Errors from the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelError<E> {
    /// Bus transaction failed
    I2c(E),
    /// WHO_AM_I returned an unexpected value
    WrongDevice(u8),
}

impl<E: embedded_hal::i2c::Error> AccelError<E> {
    /// Bus error category, `None` for identity failures
    pub fn bus_kind(&self) -> Option<embedded_hal::i2c::ErrorKind> {
        match self {
            AccelError::I2c(e) => Some(e.kind()),
            AccelError::WrongDevice(_) => None,
        }
    }
}

/// CTRL_REG1 output data rate bits for a sample rate
pub fn odr_bits(rate: SampleRate) -> u8 {
    let odr = match rate {
        SampleRate::Hz10 => 0b0010,
        SampleRate::Hz25 => 0b0011,
        SampleRate::Hz50 => 0b0100,
        SampleRate::Hz100 => 0b0101,
    };
    (odr << 4) | AXES_ENABLED
}

/// Convert a raw left-justified register pair to milli-g
pub fn raw_to_mg(low: u8, high: u8) -> i16 {
    (i16::from_le_bytes([low, high]) >> 4) * MG_PER_LSB
}

/// LIS3DH driver
pub struct Lis3dh<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Lis3dh<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check the device identity and start sampling at `rate`
    pub async fn init(&mut self, rate: SampleRate) -> Result<(), AccelError<I2C::Error>> {
        let id = self
            .read_register(reg::WHO_AM_I)
            .await
            .map_err(AccelError::I2c)?;
        if id != DEVICE_ID {
            return Err(AccelError::WrongDevice(id));
        }

        self.write_register(reg::CTRL_REG4, CTRL_REG4_VALUE)
            .await
            .map_err(AccelError::I2c)?;
        self.write_register(reg::CTRL_REG1, odr_bits(rate))
            .await
            .map_err(AccelError::I2c)
    }

    /// Read the Y axis in milli-g
    pub async fn read_y_mg(&mut self) -> Result<i16, AccelError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg::OUT_Y_L | AUTO_INCREMENT], &mut buf)
            .await
            .map_err(AccelError::I2c)?;
        Ok(raw_to_mg(buf[0], buf[1]))
    }

    /// Read all three axes in milli-g
    pub async fn read_xyz_mg(&mut self) -> Result<[i16; 3], AccelError<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::OUT_X_L | AUTO_INCREMENT], &mut buf)
            .await
            .map_err(AccelError::I2c)?;
        Ok([
            raw_to_mg(buf[0], buf[1]),
            raw_to_mg(buf[2], buf[3]),
            raw_to_mg(buf[4], buf[5]),
        ])
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf).await?;
        Ok(buf[0])
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, value]).await
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorType, Operation};

    use super::*;

    /// Register-file model of the sensor
    struct MockI2c {
        regs: [u8; 0x40],
        pointer: u8,
        last_address: u8,
    }

    impl MockI2c {
        fn new() -> Self {
            let mut regs = [0u8; 0x40];
            regs[reg::WHO_AM_I as usize] = DEVICE_ID;
            Self {
                regs,
                pointer: 0,
                last_address: 0,
            }
        }
    }

    impl ErrorType for MockI2c {
        type Error = Infallible;
    }

    impl I2c for MockI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = address;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((first, data)) = bytes.split_first() {
                            self.pointer = first & !AUTO_INCREMENT;
                            for (i, b) in data.iter().enumerate() {
                                self.regs[self.pointer as usize + i] = *b;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.regs[self.pointer as usize + i];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_raw_to_mg() {
        // 0x7FF0 is +2047 counts after the shift
        assert_eq!(raw_to_mg(0xF0, 0x7F), 4094);
        assert_eq!(raw_to_mg(0x00, 0x80), -4096);
        assert_eq!(raw_to_mg(0x00, 0x00), 0);
        // 1 g = 500 counts = 0x1F40 left-justified
        assert_eq!(raw_to_mg(0x40, 0x1F), 1000);
    }

    #[test]
    fn test_odr_bits() {
        assert_eq!(odr_bits(SampleRate::Hz10), 0x27);
        assert_eq!(odr_bits(SampleRate::Hz100), 0x57);
    }

    #[test]
    fn test_init_configures_sensor() {
        let mut accel = Lis3dh::new(MockI2c::new());
        block_on(accel.init(SampleRate::Hz10)).unwrap();

        let i2c = accel.release();
        assert_eq!(i2c.last_address, DEFAULT_ADDRESS);
        assert_eq!(i2c.regs[reg::CTRL_REG1 as usize], 0x27);
        assert_eq!(i2c.regs[reg::CTRL_REG4 as usize], CTRL_REG4_VALUE);
    }

    #[test]
    fn test_init_rejects_wrong_device() {
        let mut i2c = MockI2c::new();
        i2c.regs[reg::WHO_AM_I as usize] = 0x44;
        let mut accel = Lis3dh::new(i2c);
        let err = block_on(accel.init(SampleRate::Hz10)).unwrap_err();
        assert_eq!(err, AccelError::WrongDevice(0x44));
        assert_eq!(err.bus_kind(), None);
    }

    #[test]
    fn test_read_axes() {
        let mut i2c = MockI2c::new();
        // X = 1 g, Y = -1 g, Z = 0
        i2c.regs[0x28] = 0x40;
        i2c.regs[0x29] = 0x1F;
        i2c.regs[0x2A] = 0xC0;
        i2c.regs[0x2B] = 0xE0;
        let mut accel = Lis3dh::new(i2c);

        assert_eq!(block_on(accel.read_y_mg()), Ok(-1000));
        assert_eq!(block_on(accel.read_xyz_mg()), Ok([1000, -1000, 0]));
    }
}
