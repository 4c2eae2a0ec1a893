//! Battery gauge
//!
//! A single-cell LiPo is read through the VSYS divider (VSYS/3) on an
//! ADC input. Charge is estimated linearly between an empty and a full
//! cell voltage, which is coarse but stable enough for a percentage
//! readout.

/// Cell voltage treated as empty
pub const EMPTY_MV: u16 = 3300;

/// Cell voltage treated as full
pub const FULL_MV: u16 = 4200;

/// ADC reference voltage in millivolts
pub const ADC_VREF_MV: u32 = 3300;

/// 12-bit ADC full scale
pub const ADC_MAX: u32 = 4096;

/// VSYS is divided by three before the ADC
const DIVIDER: u32 = 3;

/// Readings must move this many percent before a change is reported
const HYSTERESIS_PERCENT: u8 = 2;

/// Convert a raw VSYS ADC reading to millivolts
pub fn adc_to_millivolts(raw: u16) -> u16 {
    let mv = raw as u32 * ADC_VREF_MV * DIVIDER / ADC_MAX;
    mv.min(u16::MAX as u32) as u16
}

/// Convert cell voltage to charge percent (0-100)
pub fn millivolts_to_percent(mv: u16) -> u8 {
    if mv <= EMPTY_MV {
        return 0;
    }
    if mv >= FULL_MV {
        return 100;
    }
    ((mv - EMPTY_MV) as u32 * 100 / (FULL_MV - EMPTY_MV) as u32) as u8
}

/// Reports charge changes worth showing
#[derive(Debug, Clone, Default)]
pub struct BatteryGauge {
    reported: Option<u8>,
}

impl BatteryGauge {
    pub fn new() -> Self {
        Self { reported: None }
    }

    /// Feed a voltage reading; returns a new percentage to report
    ///
    /// The first reading is always reported, and so are the 0 % and
    /// 100 % endpoints.
    pub fn update(&mut self, mv: u16) -> Option<u8> {
        let percent = millivolts_to_percent(mv);
        let changed = match self.reported {
            None => true,
            Some(last) => {
                last.abs_diff(percent) >= HYSTERESIS_PERCENT
                    || (percent != last && (percent == 0 || percent == 100))
            }
        };
        if changed {
            self.reported = Some(percent);
            Some(percent)
        } else {
            None
        }
    }

    /// Last reported percentage
    pub fn percent(&self) -> Option<u8> {
        self.reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_endpoints() {
        assert_eq!(millivolts_to_percent(0), 0);
        assert_eq!(millivolts_to_percent(3300), 0);
        assert_eq!(millivolts_to_percent(3750), 50);
        assert_eq!(millivolts_to_percent(4200), 100);
        assert_eq!(millivolts_to_percent(5000), 100);
    }

    #[test]
    fn test_adc_conversion() {
        assert_eq!(adc_to_millivolts(0), 0);
        // Half scale is 1.65 V at the pin, 4.95 V on VSYS
        assert_eq!(adc_to_millivolts(2048), 4950);
    }

    #[test]
    fn test_gauge_hysteresis() {
        let mut gauge = BatteryGauge::new();
        assert_eq!(gauge.update(3750), Some(50));
        // 3759 mV is 51 %, within the band
        assert_eq!(gauge.update(3759), None);
        assert_eq!(gauge.update(3768), Some(52));
        assert_eq!(gauge.percent(), Some(52));
    }

    #[test]
    fn test_gauge_reports_endpoints() {
        let mut gauge = BatteryGauge::new();
        assert_eq!(gauge.update(4191), Some(99));
        assert_eq!(gauge.update(4300), Some(100));
        assert_eq!(gauge.update(4300), None);
    }

    proptest::proptest! {
        #[test]
        fn prop_percent_monotonic(a in 0u16..6000, b in 0u16..6000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            proptest::prop_assert!(millivolts_to_percent(lo) <= millivolts_to_percent(hi));
            proptest::prop_assert!(millivolts_to_percent(hi) <= 100);
        }
    }
}
