use std::env;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::CellSize;
use crate::timer::Interval;

/// Environment variable holding the cell edge length, in pixels.
pub const CELL_SIZE_VAR: &str = "LIFE_CELL_SIZE";

/// Environment variable holding the time between generations, in milliseconds.
pub const INTERVAL_VAR: &str = "LIFE_INTERVAL_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got \"{value}\"")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Edge length of a cell, in pixels
    pub cell_size: CellSize,

    /// Time between generations when the simulation starts
    pub interval: Interval,

    /// How much one speed control press changes the interval, in milliseconds
    pub speed_step: u64,

    /// Range the speed control moves the interval within, in milliseconds
    pub speed_range: RangeInclusive<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: 25,
            interval: Interval::from_millis(1000),
            speed_step: 100,
            speed_range: 100..=1000,
        }
    }
}

impl Config {
    /// Override fields from `LIFE_CELL_SIZE` and `LIFE_INTERVAL_MS` when they are set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply(|var| env::var(var).ok())
    }

    /// Override fields from `lookup`, which maps a variable name to its value, if any.
    pub fn apply<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = lookup(CELL_SIZE_VAR) {
            self.cell_size = parse_positive(CELL_SIZE_VAR, &value)?;
        }

        if let Some(value) = lookup(INTERVAL_VAR) {
            self.interval = Interval::from_millis(parse_positive(INTERVAL_VAR, &value)?);
        }

        Ok(())
    }

    /// The interval one step faster than `current`, kept within `speed_range`.
    pub fn faster(&self, current: Interval) -> Interval {
        let ms = current.as_millis().saturating_sub(self.speed_step);

        self.clamp_speed(ms)
    }

    /// The interval one step slower than `current`, kept within `speed_range`.
    pub fn slower(&self, current: Interval) -> Interval {
        let ms = current.as_millis().saturating_add(self.speed_step);

        self.clamp_speed(ms)
    }

    fn clamp_speed(&self, ms: u64) -> Interval {
        Interval::from_millis(ms.clamp(*self.speed_range.start(), *self.speed_range.end()))
    }
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let n: T = value.trim().parse().map_err(|_| ConfigError::NotANumber {
        var,
        value: value.to_string(),
    })?;

    if n == T::default() {
        return Err(ConfigError::Zero { var });
    }

    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(
        pairs: &'a [(&'static str, &'a str)],
    ) -> impl Fn(&'static str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.cell_size, 25);
        assert_eq!(config.interval.as_millis(), 1000);
    }

    #[test]
    fn overrides() {
        let mut config = Config::default();

        config
            .apply(lookup(&[(CELL_SIZE_VAR, "4"), (INTERVAL_VAR, " 250 ")]))
            .unwrap();

        assert_eq!(config.cell_size, 4);
        assert_eq!(config.interval.as_millis(), 250);
    }

    #[test]
    fn env_reads_the_process_environment() {
        let mut expected = Config::default();
        let expected_res = expected.apply(|var| env::var(var).ok());

        let mut config = Config::default();

        assert_eq!(config.apply_env(), expected_res);
        assert_eq!(config, expected);
    }

    #[test]
    fn short_interval_is_clamped() {
        let mut config = Config::default();

        config.apply(lookup(&[(INTERVAL_VAR, "1")])).unwrap();

        assert_eq!(config.interval, Interval::MIN);
    }

    #[test]
    fn bad_values() {
        let mut config = Config::default();

        assert_eq!(
            config.apply(lookup(&[(CELL_SIZE_VAR, "big")])),
            Err(ConfigError::NotANumber {
                var: CELL_SIZE_VAR,
                value: "big".to_string()
            })
        );
        assert_eq!(
            config.apply(lookup(&[(CELL_SIZE_VAR, "0")])),
            Err(ConfigError::Zero { var: CELL_SIZE_VAR })
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn speed_steps_stay_in_range() {
        let config = Config::default();

        assert_eq!(config.faster(Interval::from_millis(1000)).as_millis(), 900);
        assert_eq!(config.faster(Interval::from_millis(100)).as_millis(), 100);
        assert_eq!(config.slower(Interval::from_millis(900)).as_millis(), 1000);
        assert_eq!(config.slower(Interval::from_millis(1000)).as_millis(), 1000);

        // an interval outside the range snaps back into it
        assert_eq!(config.faster(Interval::from_millis(10)).as_millis(), 100);
    }
}
