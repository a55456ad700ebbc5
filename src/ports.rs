// src/ports.rs
use crate::config::Config;
use crate::error::FleetError;
use log::debug;
use rand::Rng;

// A candidate conflicts when it lands within the band around any existing
// group's port section; the band keeps a group's instance ports
// (port_section + n) clear of its neighbours.
pub fn conflicts(port: u16, existing_sections: &[u16], band: u16) -> bool {
    existing_sections
        .iter()
        .any(|section| port.abs_diff(*section) <= band)
}

// Random candidates from the configured range until one clears every
// existing band. Attempts are bounded: a saturated range surfaces
// PortRangeExhausted instead of spinning forever.
pub fn allocate_port(existing_sections: &[u16], config: &Config) -> Result<u16, FleetError> {
    let mut rng = rand::thread_rng();
    for attempt in 0..config.port_alloc_max_attempts {
        let candidate = rng.gen_range(config.port_range_min..=config.port_range_max);
        if !conflicts(candidate, existing_sections, config.port_conflict_band) {
            debug!(
                "allocated port section {} after {} attempt(s)",
                candidate,
                attempt + 1
            );
            return Ok(candidate);
        }
    }
    Err(FleetError::PortRangeExhausted {
        attempts: config.port_alloc_max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_port_clears_every_band() {
        let config = Config::default();
        let existing = vec![25100, 25500, 25900];
        for _ in 0..200 {
            let port = allocate_port(&existing, &config).unwrap();
            for section in &existing {
                assert!(port.abs_diff(*section) > config.port_conflict_band);
            }
            assert!(port >= config.port_range_min && port <= config.port_range_max);
        }
    }

    #[test]
    fn band_boundary_is_a_conflict() {
        assert!(conflicts(25010, &[25000], 10));
        assert!(!conflicts(25011, &[25000], 10));
        assert!(conflicts(24990, &[25000], 10));
    }

    #[test]
    fn saturated_range_is_surfaced() {
        let config = Config {
            port_range_min: 25000,
            port_range_max: 25020,
            ..Config::default()
        };
        // One section at the middle of a 21-port range blankets all of it.
        let err = allocate_port(&[25010], &config).unwrap_err();
        assert!(matches!(err, FleetError::PortRangeExhausted { .. }));
    }
}
