//! Конфигурация сборки сетевого стека / Network stack build configuration
//!
//! Стек собирается отдельно, с собственным заголовком конфигурации.
//! Здесь — только переключатели и их рендер в `#define`.
//! The stack is built separately; this is only its switch set and the
//! `#define` rendering that feeds the stack's build.

use core::fmt::{self, Write};

use bitflags::bitflags;

use crate::cyw43::AuthMode;

bitflags! {
    /// `MG_WIFI_SECURITY_*`; пустой набор — открытая сеть.
    /// Empty set is an open network.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WifiSecurity: u8 {
        const WEP  = 1 << 0;
        const WPA  = 1 << 1;
        const WPA2 = 1 << 2;
        const WPA3 = 1 << 3;
    }
}

impl WifiSecurity {
    pub const OPEN: Self = Self::empty();

    /// Режим аутентификации драйвера; WEP драйвер не поддерживает.
    /// Driver auth mode for this set; WEP has no driver equivalent.
    pub fn auth_mode(self) -> Option<AuthMode> {
        if self.contains(Self::WEP) {
            return None;
        }
        let mode = if self.contains(Self::WPA3) {
            if self.contains(Self::WPA2) { AuthMode::Wpa3Wpa2AesPsk } else { AuthMode::Wpa3SaeAesPsk }
        } else if self.contains(Self::WPA2) {
            if self.contains(Self::WPA) { AuthMode::Wpa2MixedPsk } else { AuthMode::Wpa2AesPsk }
        } else if self.contains(Self::WPA) {
            AuthMode::WpaTkipPsk
        } else {
            AuthMode::Open
        };
        Some(mode)
    }
}

/// `MG_ARCH_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    PicoSdk,
}

impl Arch {
    const fn define(self) -> &'static str {
        match self {
            Arch::PicoSdk => "MG_ARCH_PICOSDK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    pub arch:               Arch,
    /// Встроенный TCP/IP / Built-in TCP/IP stack
    pub builtin_tcpip:      bool,
    /// Встроенный драйвер Pico W / Built-in Pico W driver
    pub driver_pico_w:      bool,
    /// Режим сокетов lwIP (SDK собран с `LWIP_SOCKET=0`, поэтому выключен).
    pub lwip:               bool,
    pub os_sockets:         bool,
    pub posix_fs:           bool,
    pub packed_fs:          bool,
    pub fatfs:              bool,
    pub ssi:                bool,
    pub ota:                bool,
    pub line_numbers:       bool,
    pub io_size:            usize,
}

impl StackConfig {
    pub const DEFAULT: Self = Self {
        arch:          Arch::PicoSdk,
        builtin_tcpip: true,
        driver_pico_w: true,
        lwip:          false,
        os_sockets:    false,
        posix_fs:      false,
        packed_fs:     false,
        fatfs:         false,
        ssi:           false,
        ota:           false,
        line_numbers:  false,
        io_size:       1024,
    };

    /// Вывести заголовок конфигурации в стабильном порядке.
    /// Render the configuration header in a stable order.
    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "// Generated by picobridge-stackcfg. Do not edit.")?;
        writeln!(out, "#pragma once")?;
        writeln!(out)?;
        writeln!(out, "#define MG_ARCH {}", self.arch.define())?;
        // OTA guard in mongoose.h compares MG_OTA against MG_OTA_PICOSDK
        writeln!(out, "#define MG_OTA_PICOSDK 920")?;
        if self.ota {
            writeln!(out, "#define MG_OTA MG_OTA_PICOSDK")?;
        } else {
            writeln!(out, "#define MG_OTA 0")?;
        }
        flag(out, "MG_ENABLE_SSI", self.ssi)?;
        flag(out, "MG_ENABLE_POSIX_FS", self.posix_fs)?;
        flag(out, "MG_ENABLE_PACKED_FS", self.packed_fs)?;
        flag(out, "MG_ENABLE_FATFS", self.fatfs)?;
        flag(out, "MG_ENABLE_LINES", self.line_numbers)?;
        writeln!(out, "#define MG_IO_SIZE {}", self.io_size)?;
        writeln!(out)?;
        flag(out, "MG_ENABLE_LWIP", self.lwip)?;
        flag(out, "MG_ENABLE_TCPIP", self.builtin_tcpip)?;
        flag(out, "MG_ENABLE_DRIVER_PICO_W", self.driver_pico_w)?;
        flag(out, "MG_ENABLE_SOCKET", self.os_sockets)?;
        Ok(())
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn flag<W: Write>(out: &mut W, name: &str, on: bool) -> fmt::Result {
    writeln!(out, "#define {} {}", name, on as u8)
}
