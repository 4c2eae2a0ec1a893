//! Configuration persistence
//!
//! Loads the watch configuration from flash storage.
//! Falls back to built-in defaults if flash is empty.

use defmt::*;

use stride_core::config::{ConfigError, WatchConfig};
use stride_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey};
// Import the FlashStorage trait to bring methods into scope
use stride_hal_rp2040::FlashStorageTrait;

/// Maximum serialized config size (binary)
const MAX_CONFIG_SIZE: usize = 64;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigLoadError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// Stored config failed validation
    Invalid(ConfigError),
}

impl From<FlashError> for ConfigLoadError {
    fn from(e: FlashError) -> Self {
        ConfigLoadError::Flash(e)
    }
}

/// Decode and validate a stored configuration
pub fn decode_config(bytes: &[u8]) -> Result<WatchConfig, ConfigLoadError> {
    let config: WatchConfig =
        postcard::from_bytes(bytes).map_err(|_| ConfigLoadError::Deserialize)?;
    config.validate().map_err(ConfigLoadError::Invalid)?;
    Ok(config)
}

/// Decode a stored step count (little-endian i32)
pub fn decode_step_count(bytes: &[u8]) -> Option<i32> {
    let raw: [u8; 4] = bytes.try_into().ok()?;
    Some(i32::from_le_bytes(raw))
}

/// Configuration persistence manager
///
/// Reads the watch configuration and step count from flash storage.
pub struct ConfigPersistence<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    /// Create a new config persistence manager
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Consume this persistence manager and return the underlying storage
    ///
    /// The persist task takes the storage over once loading is done.
    pub fn into_storage(self) -> Rp2040FlashStorage<'d> {
        self.storage
    }

    /// Load configuration from flash
    pub async fn load(&mut self) -> Result<WatchConfig, ConfigLoadError> {
        info!("Loading configuration from flash...");

        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self
            .storage
            .read(StorageKey::WatchConfig, &mut buffer)
            .await?;

        debug!("Read {} bytes of config from flash", len);

        let config = decode_config(&buffer[..len])?;
        log_config_summary(&config);
        Ok(config)
    }

    /// Load configuration, using defaults for anything missing or invalid
    pub async fn load_or_default(&mut self) -> WatchConfig {
        match self.load().await {
            Ok(config) => config,
            Err(ConfigLoadError::Flash(FlashError::NotFound)) => {
                info!("No configuration in flash, using defaults");
                WatchConfig::default()
            }
            Err(ConfigLoadError::Flash(FlashError::Corrupted)) => {
                error!("Storage partition corrupted, erasing");
                if let Err(e) = self.storage.erase_all().await {
                    error!("Failed to erase storage: {:?}", e);
                }
                WatchConfig::default()
            }
            Err(e) => {
                warn!("Stored configuration rejected: {:?}, using defaults", e);
                WatchConfig::default()
            }
        }
    }

    /// Load the saved step count
    ///
    /// A missing or malformed record reads as zero.
    pub async fn load_step_count(&mut self) -> i32 {
        let mut buffer = [0u8; 4];
        match self.storage.read(StorageKey::StepCount, &mut buffer).await {
            Ok(len) => match decode_step_count(&buffer[..len]) {
                Some(steps) => {
                    info!("Restored step count: {}", steps);
                    steps
                }
                None => {
                    warn!("Step count record has {} bytes, ignoring", len);
                    0
                }
            },
            Err(FlashError::NotFound) => 0,
            Err(e) => {
                warn!("Failed to read step count: {:?}", e);
                0
            }
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &WatchConfig) {
    info!("Configuration loaded successfully");
    debug!(
        "  step threshold {} mg, min diff {} mg, debounce {}",
        config.pedometer.step_threshold, config.pedometer.min_diff, config.pedometer.min_time_diff
    );
    debug!(
        "  reset at {:02}:{:02}, refresh every {} min",
        config.schedule.reset_hour, config.schedule.reset_minute, config.schedule.refresh_interval_min
    );
}
