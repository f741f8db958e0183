//! Toolchains and build configurations the generator can target

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Native build system to emit files for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolchain {
    /// GNU Make (`make/Makefile`)
    Make,
    /// CMake (`cmake/CMakeLists.txt`)
    #[serde(rename = "cmake")]
    CMake,
}

impl Toolchain {
    pub const ALL: [Toolchain; 2] = [Toolchain::Make, Toolchain::CMake];

    pub fn as_str(&self) -> &'static str {
        match self {
            Toolchain::Make => "make",
            Toolchain::CMake => "cmake",
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Toolchain {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "make" | "gmake" | "makefile" => Ok(Toolchain::Make),
            "cmake" => Ok(Toolchain::CMake),
            _ => Err(GenError::UnknownToolchain {
                value: s.to_string(),
            }),
        }
    }
}

/// Build configuration emitted into every generated build file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    Debug,
    Release,
}

impl BuildConfiguration {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "debug",
            BuildConfiguration::Release => "release",
        }
    }

    /// Preprocessor define identifying the configuration
    pub fn define(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "TARGET_DEBUG",
            BuildConfiguration::Release => "TARGET_RELEASE",
        }
    }

    /// Optimisation and debug-info flags
    pub fn cxx_flags(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "-O0 -g",
            BuildConfiguration::Release => "-O2",
        }
    }

    /// Name CMake uses for `CMAKE_BUILD_TYPE`
    pub fn cmake_name(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "Debug",
            BuildConfiguration::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfiguration {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildConfiguration::Debug),
            "release" => Ok(BuildConfiguration::Release),
            _ => Err(GenError::UnknownConfiguration {
                value: s.to_string(),
            }),
        }
    }
}
