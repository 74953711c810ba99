//! Simulated set of online players.

use std::fmt;
use std::net::Ipv4Addr;

use parking_lot::Mutex;
use rand::Rng;
use thiserror::Error;

/// Longest name a player may log in with.
pub const MAX_NAME_LEN: usize = 16;

/// Horizontal world border.
const WORLD_BORDER: f64 = 30_000_000.0;
/// Vertical build limit, both ways.
const BUILD_LIMIT: f64 = 320.0;

/// Why a roster change was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Player limit reached")]
    Full,

    #[error("Player already logged in")]
    AlreadyOnline,

    #[error("Player not found")]
    NotFound,

    #[error("Invalid player name")]
    InvalidName,
}

/// Details of a successful join.
#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    pub name: String,
    pub address: String,
    pub port: u16,
    pub entity_id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[/{}:{}] logged in with entity id {} at ({}, {:.1}, {})",
            self.name, self.address, self.port, self.entity_id, self.x, self.y, self.z
        )
    }
}

#[derive(Debug, Default)]
struct RosterState {
    names: Vec<String>,
    last_entity_id: u32,
}

/// Players currently online, in join order.
#[derive(Debug)]
pub struct OnlineRoster {
    capacity: usize,
    state: Mutex<RosterState>,
}

impl OnlineRoster {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(RosterState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.state.lock().names.len()
    }

    /// Online names in join order.
    pub fn names(&self) -> Vec<String> {
        self.state.lock().names.clone()
    }

    pub fn is_online(&self, name: &str) -> bool {
        self.state.lock().names.iter().any(|online| online == name)
    }

    /// Log `name` in. A random address is used when none is given.
    pub fn add(&self, name: &str, address: Option<&str>) -> Result<Login, RosterError> {
        if !is_valid_name(name) {
            return Err(RosterError::InvalidName);
        }

        let mut state = self.state.lock();
        if state.names.len() >= self.capacity {
            return Err(RosterError::Full);
        }
        if state.names.iter().any(|online| online == name) {
            return Err(RosterError::AlreadyOnline);
        }

        state.names.push(name.to_string());
        state.last_entity_id += 1;
        let entity_id = state.last_entity_id;
        drop(state);

        let mut rng = rand::rng();
        let address = match address {
            Some(address) => address.to_string(),
            None => Ipv4Addr::from(rng.random::<u32>()).to_string(),
        };
        Ok(Login {
            name: name.to_string(),
            address,
            port: rng.random::<u16>(),
            entity_id,
            x: rng.random_range(-WORLD_BORDER..=WORLD_BORDER),
            y: (rng.random_range(-BUILD_LIMIT..=BUILD_LIMIT) * 10.0).round() / 10.0,
            z: rng.random_range(-WORLD_BORDER..=WORLD_BORDER),
        })
    }

    pub fn remove(&self, name: &str) -> Result<(), RosterError> {
        let mut state = self.state.lock();
        let index = state
            .names
            .iter()
            .position(|online| online == name)
            .ok_or(RosterError::NotFound)?;
        state.names.remove(index);
        Ok(())
    }
}

/// Word characters only, at most [`MAX_NAME_LEN`] of them.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_NAME_LEN
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}
