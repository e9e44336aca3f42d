//! Раскладка состояния драйвера CYW43 / CYW43 driver state layout
//!
//! Драйвер радио (Pico SDK `cyw43-driver`, собран с
//! `CYW43_BACKPLANE_READ_PAD_LEN_BYTES = 16` и без переменных
//! legacy F1 overflow workaround) владеет единственным экземпляром
//! `cyw43_t`. Здесь объявлены только поля, которые трогает код
//! интеграции сетевого стека; остальное — непрозрачные байты.
//!
//! The radio driver owns the single `cyw43_t` instance. Only the fields
//! touched by the network stack's driver integration are declared; the
//! lwIP `struct netif[2]` and `struct dhcp` regions are opaque byte
//! blocks, because the built-in TCP/IP stack links its own, different
//! `struct dhcp`. Nothing here reads or writes through those regions.
//!
//! Раскладка (32-бит, Cortex-M) / Layout (32-bit, Cortex-M):
//!
//!  Смещение / Offset  Поле / Field
//!  ─────────────────────────────────────────
//!  0                  cyw43_ll      (532 слова / words)
//!  2128               itf_state
//!  2132               trace_flags
//!  2136               wifi_scan_state (volatile)
//!  2140               wifi_join_state
//!  2144               wifi_scan_env
//!  2148               wifi_scan_cb
//!  2152               initted, pend_disassoc, pend_rejoin, pend_rejoin_wpa
//!  2156               ap_auth
//!  2160               ap_channel, ap_ssid_len, ap_key_len
//!  2163               ap_ssid[32]
//!  2195               ap_key[64]
//!  2259               netif_opaque[2][64]
//!  2387               dhcp_client_opaque[56]
//!  2443               mac[6]
//!  2452               (размер / size)
//!
//! Размеры непрозрачных областей подобраны под одну версию драйвера.
//! Если реальные `netif`/`dhcp` больше, запись стека затрёт `mac`;
//! проверить это во время выполнения невозможно.

use core::ffi::{c_int, c_void};
use core::mem::{offset_of, size_of};
use core::ptr;

use static_assertions::const_assert_eq;

use crate::{Error, Result};

// ── Параметры сборки драйвера / Driver build parameters ─────────────────────

pub const BACKPLANE_READ_PAD_LEN_BYTES: usize = 16;
pub const INCLUDE_LEGACY_F1_OVERFLOW_WORKAROUND_VARIABLES: usize = 0;
pub const LL_STATE_SIZE_WORDS: usize = 526
    + 1
    + ((BACKPLANE_READ_PAD_LEN_BYTES / 4) + 1)
    + INCLUDE_LEGACY_F1_OVERFLOW_WORKAROUND_VARIABLES * 4;

pub const AP_SSID_MAX: usize = 32;
pub const AP_KEY_MAX:  usize = 64;
pub const MAC_LEN:     usize = 6;

/// Заглушки под lwIP `struct netif` ×2 и `struct dhcp`.
/// Placeholders for lwIP `struct netif` ×2 and `struct dhcp`.
pub const NETIF_COUNT:        usize = 2;
pub const NETIF_OPAQUE_BYTES: usize = 64;
pub const DHCP_OPAQUE_BYTES:  usize = 56;

pub const CHANNEL_NONE: u32 = 0xffff_ffff;

const SCAN_STATE_ACTIVE: u32 = 1;

// ── Константы драйвера / Driver constants ───────────────────────────────────

/// `CYW43_ITF_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Sta = 0,
    Ap  = 1,
}

impl Interface {
    pub const fn raw(self) -> c_int {
        self as c_int
    }
}

/// `CYW43_LINK_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Down,
    Join,
    NoIp,
    Up,
    Fail,
    NoNet,
    BadAuth,
    Unknown(i32),
}

impl LinkStatus {
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0  => LinkStatus::Down,
            1  => LinkStatus::Join,
            2  => LinkStatus::NoIp,
            3  => LinkStatus::Up,
            -1 => LinkStatus::Fail,
            -2 => LinkStatus::NoNet,
            -3 => LinkStatus::BadAuth,
            other => LinkStatus::Unknown(other),
        }
    }

    pub const fn is_up(self) -> bool {
        matches!(self, LinkStatus::Up)
    }
}

/// `CYW43_AUTH_*` — значения передаются драйверу как есть.
/// Raw values are passed straight to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AuthMode {
    Open           = 0x0000_0000,
    WpaTkipPsk     = 0x0020_0002,
    Wpa2AesPsk     = 0x0040_0004,
    Wpa2MixedPsk   = 0x0040_0006,
    Wpa3SaeAesPsk  = 0x0100_0004,
    Wpa3Wpa2AesPsk = 0x0140_0004,
}

impl AuthMode {
    pub const fn raw(self) -> u32 {
        self as u32
    }

    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x0000_0000 => Some(AuthMode::Open),
            0x0020_0002 => Some(AuthMode::WpaTkipPsk),
            0x0040_0004 => Some(AuthMode::Wpa2AesPsk),
            0x0040_0006 => Some(AuthMode::Wpa2MixedPsk),
            0x0100_0004 => Some(AuthMode::Wpa3SaeAesPsk),
            0x0140_0004 => Some(AuthMode::Wpa3Wpa2AesPsk),
            _ => None,
        }
    }
}

// ── Сканирование / Scanning ─────────────────────────────────────────────────

/// `cyw43_ev_scan_result_t` — живёт только на время вызова callback.
/// Valid only for the duration of the scan callback.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
#[allow(dead_code)]
pub struct ScanResult {
    reserved0:     [u32; 5],
    pub bssid:     [u8; MAC_LEN],
    reserved1:     [u16; 2],
    pub ssid_len:  u8,
    pub ssid:      [u8; 32],
    reserved2:     [u32; 5],
    pub channel:   u16,
    reserved3:     u16,
    pub auth_mode: u8,
    pub rssi:      i16,
}

impl ScanResult {
    pub fn ssid(&self) -> &[u8] {
        let len = (self.ssid_len as usize).min(self.ssid.len());
        &self.ssid[..len]
    }
}

/// `cyw43_wifi_scan_options_t`
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct ScanOptions {
    pub version:      u32,
    pub action:       u16,
    reserved:         u16,
    pub ssid_len:     u32,
    pub ssid:         [u8; 32],
    pub bssid:        [u8; MAC_LEN],
    pub bss_type:     i8,
    pub scan_type:    i8,
    pub nprobes:      i32,
    pub active_time:  i32,
    pub passive_time: i32,
    pub home_time:    i32,
    pub channel_num:  i32,
    pub channel_list: [u16; 1],
}

impl ScanOptions {
    /// Сканировать только указанный SSID (усекается до 32 байт).
    /// Scan for one SSID only (truncated to 32 bytes).
    pub fn for_ssid(ssid: &[u8]) -> Self {
        let mut opts = Self::default();
        let (len, _) = copy_bounded(&mut opts.ssid, ssid);
        opts.ssid_len = len as u32;
        opts
    }
}

/// Callback драйвера на каждый найденный BSS.
/// Driver callback per discovered BSS; non-zero return is a stop request
/// the driver may ignore.
pub type ScanResultCallback =
    unsafe extern "C" fn(env: *mut c_void, result: *const ScanResult) -> c_int;

// ── Точки входа стека / Stack entry points ──────────────────────────────────

/// `cyw43_cb_process_ethernet`: драйвер отдаёт стеку принятый кадр.
/// Driver hands a received frame to the stack.
pub type ProcessEthernetCallback =
    unsafe extern "C" fn(cb_data: *mut c_void, itf: c_int, len: usize, buf: *const u8);

/// `cyw43_cb_tcpip_set_link_up` / `cyw43_cb_tcpip_set_link_down`
pub type LinkChangeCallback = unsafe extern "C" fn(state: *mut Cyw43, itf: c_int);

// ── Состояние драйвера / Driver state ───────────────────────────────────────

/// `cyw43_ll_t` — целиком непрозрачен / fully opaque
#[repr(C)]
#[allow(dead_code)]
pub struct Cyw43Ll {
    opaque: [u32; LL_STATE_SIZE_WORDS],
}

/// `cyw43_t`
///
/// Экземпляр никогда не создаётся и не копируется этим слоем: он
/// принадлежит драйверу (`cyw43_state`). Синхронизации нет — доступ
/// только с одного ядра, драйвер сам маскирует прерывания вокруг
/// своих изменений.
#[repr(C)]
#[allow(dead_code)]
pub struct Cyw43 {
    cyw43_ll:           Cyw43Ll,
    itf_state:          u8,
    trace_flags:        u32,
    wifi_scan_state:    u32,
    wifi_join_state:    u32,
    wifi_scan_env:      *mut c_void,
    wifi_scan_cb:       Option<ScanResultCallback>,
    initted:            bool,
    pend_disassoc:      bool,
    pend_rejoin:        bool,
    pend_rejoin_wpa:    bool,
    ap_auth:            u32,
    ap_channel:         u8,
    ap_ssid_len:        u8,
    ap_key_len:         u8,
    ap_ssid:            [u8; AP_SSID_MAX],
    ap_key:             [u8; AP_KEY_MAX],
    netif_opaque:       [[u8; NETIF_OPAQUE_BYTES]; NETIF_COUNT],
    dhcp_client_opaque: [u8; DHCP_OPAQUE_BYTES],
    mac:                [u8; MAC_LEN],
}

impl Cyw43 {
    /// Идёт ли сканирование. Поле `volatile` в C — читаем так же.
    pub fn scan_active(&self) -> bool {
        // SAFETY: aligned field of a live reference
        unsafe { ptr::read_volatile(&self.wifi_scan_state) == SCAN_STATE_ACTIVE }
    }

    pub fn is_initialized(&self) -> bool {
        self.initted
    }

    /// Интерфейс поднят драйвером (бит `1 << itf` в `itf_state`).
    /// Interface brought up by the driver (bit `1 << itf`).
    pub fn is_interface_up(&self, itf: Interface) -> bool {
        self.itf_state & (1 << itf.raw()) != 0
    }

    pub fn join_state(&self) -> u32 {
        self.wifi_join_state
    }

    pub fn trace_flags(&self) -> u32 {
        self.trace_flags
    }

    pub fn mac(&self) -> [u8; MAC_LEN] {
        self.mac
    }

    /// Канал хранится как `u8`, старшие биты отбрасываются (как в C).
    /// Stored as `u8`; high bits are dropped the way the C helper does.
    pub fn set_ap_channel(&mut self, channel: u32) {
        self.ap_channel = channel as u8;
    }

    pub fn ap_channel(&self) -> u8 {
        self.ap_channel
    }

    /// Записать SSID точки доступа. Длиннее 32 байт — усекается,
    /// записывается усечённая длина и возвращается `Error::Range`.
    /// Longer input is truncated, the truncated length recorded, and
    /// `Error::Range` returned after the copy.
    pub fn set_ap_ssid(&mut self, ssid: &[u8]) -> Result<()> {
        let (len, truncated) = copy_bounded(&mut self.ap_ssid, ssid);
        self.ap_ssid_len = len as u8;
        if truncated { Err(Error::Range) } else { Ok(()) }
    }

    pub fn ap_ssid(&self) -> &[u8] {
        let len = (self.ap_ssid_len as usize).min(AP_SSID_MAX);
        &self.ap_ssid[..len]
    }

    /// То же для ключа (до 64 байт) / Same discipline, 64-byte key
    pub fn set_ap_password(&mut self, key: &[u8]) -> Result<()> {
        let (len, truncated) = copy_bounded(&mut self.ap_key, key);
        self.ap_key_len = len as u8;
        if truncated { Err(Error::Range) } else { Ok(()) }
    }

    pub fn ap_password(&self) -> &[u8] {
        let len = (self.ap_key_len as usize).min(AP_KEY_MAX);
        &self.ap_key[..len]
    }

    pub fn set_ap_auth(&mut self, auth: AuthMode) {
        self.ap_auth = auth.raw();
    }

    pub fn ap_auth_raw(&self) -> u32 {
        self.ap_auth
    }

    pub fn ap_auth(&self) -> Option<AuthMode> {
        AuthMode::from_raw(self.ap_auth)
    }
}

/// Скопировать не больше, чем вмещает `dst`. Возвращает (длина, усечено).
/// Copy at most `dst.len()` bytes. Returns (length, truncated).
pub fn copy_bounded(dst: &mut [u8], src: &[u8]) -> (usize, bool) {
    let len = src.len().min(dst.len());
    dst[..len].copy_from_slice(&src[..len]);
    (len, len < src.len())
}

// ── Раскладка на цели / Target layout ───────────────────────────────────────

/// Размер указателя на RP2350 (Cortex-M33) / Pointer size on the RP2350
pub const TARGET_POINTER_BYTES: usize = 4;

const FIELD_COUNT: usize = 20;

/// (поле, размер, выравнивание) на цели, в порядке объявления `Cyw43`.
/// (field, size, align) on the target, in `Cyw43` declaration order.
const TARGET_FIELDS: [(&str, usize, usize); FIELD_COUNT] = [
    ("cyw43_ll",           LL_STATE_SIZE_WORDS * 4,               4),
    ("itf_state",          1,                                     1),
    ("trace_flags",        4,                                     4),
    ("wifi_scan_state",    4,                                     4),
    ("wifi_join_state",    4,                                     4),
    ("wifi_scan_env",      TARGET_POINTER_BYTES,                  TARGET_POINTER_BYTES),
    ("wifi_scan_cb",       TARGET_POINTER_BYTES,                  TARGET_POINTER_BYTES),
    ("initted",            1,                                     1),
    ("pend_disassoc",      1,                                     1),
    ("pend_rejoin",        1,                                     1),
    ("pend_rejoin_wpa",    1,                                     1),
    ("ap_auth",            4,                                     4),
    ("ap_channel",         1,                                     1),
    ("ap_ssid_len",        1,                                     1),
    ("ap_key_len",         1,                                     1),
    ("ap_ssid",            AP_SSID_MAX,                           1),
    ("ap_key",             AP_KEY_MAX,                            1),
    ("netif_opaque",       NETIF_COUNT * NETIF_OPAQUE_BYTES,      1),
    ("dhcp_client_opaque", DHCP_OPAQUE_BYTES,                     1),
    ("mac",                MAC_LEN,                               1),
];

const fn align_up(value: usize, align: usize) -> usize {
    (value + align - 1) / align * align
}

/// Правила `repr(C)`, применённые к таблице цели.
/// `repr(C)` placement applied to the target table.
const fn target_layout() -> ([(&'static str, usize); FIELD_COUNT], usize) {
    let mut table = [("", 0); FIELD_COUNT];
    let mut offset = 0;
    let mut max_align = 1;
    let mut i = 0;
    while i < FIELD_COUNT {
        let (name, size, align) = TARGET_FIELDS[i];
        offset = align_up(offset, align);
        table[i] = (name, offset);
        offset += size;
        if align > max_align {
            max_align = align;
        }
        i += 1;
    }
    (table, align_up(offset, max_align))
}

const TARGET_LAYOUT: ([(&str, usize); FIELD_COUNT], usize) = target_layout();

/// Смещения полей `cyw43_t` на RP2350, независимо от хоста сборки.
/// Offsets of the declared `cyw43_t` fields on the RP2350, whatever host
/// computes them; for cross-checking against the driver build.
pub const FIELD_OFFSETS: &[(&str, usize)] = &TARGET_LAYOUT.0;

/// `sizeof(cyw43_t)` на цели / on the target
pub const TARGET_SIZE: usize = TARGET_LAYOUT.1;

pub fn field_offset(name: &str) -> Option<usize> {
    FIELD_OFFSETS.iter().find(|(field, _)| *field == name).map(|&(_, off)| off)
}

// ── Проверки раскладки при компиляции / Compile-time layout checks ─────────

const_assert_eq!(LL_STATE_SIZE_WORDS, 532);
const_assert_eq!(size_of::<Cyw43Ll>(), 2128);
const_assert_eq!(size_of::<ScanResult>(), 92);
const_assert_eq!(offset_of!(ScanResult, ssid), 31);
const_assert_eq!(offset_of!(ScanResult, rssi), 90);
const_assert_eq!(size_of::<ScanOptions>(), 76);
const_assert_eq!(offset_of!(ScanOptions, channel_list), 72);

const_assert_eq!(TARGET_SIZE, 2452);
const_assert_eq!(TARGET_LAYOUT.0[6].1, 2148);
const_assert_eq!(TARGET_LAYOUT.0[11].1, 2156);
const_assert_eq!(TARGET_LAYOUT.0[15].1, 2163);
const_assert_eq!(TARGET_LAYOUT.0[17].1, 2259);
const_assert_eq!(TARGET_LAYOUT.0[19].1, 2443);

/// Смещения по `offset_of!` для этой сборки, в том же порядке.
/// Offsets of this build, in `TARGET_FIELDS` order.
const BUILD_OFFSETS: [usize; FIELD_COUNT] = [
    offset_of!(Cyw43, cyw43_ll),
    offset_of!(Cyw43, itf_state),
    offset_of!(Cyw43, trace_flags),
    offset_of!(Cyw43, wifi_scan_state),
    offset_of!(Cyw43, wifi_join_state),
    offset_of!(Cyw43, wifi_scan_env),
    offset_of!(Cyw43, wifi_scan_cb),
    offset_of!(Cyw43, initted),
    offset_of!(Cyw43, pend_disassoc),
    offset_of!(Cyw43, pend_rejoin),
    offset_of!(Cyw43, pend_rejoin_wpa),
    offset_of!(Cyw43, ap_auth),
    offset_of!(Cyw43, ap_channel),
    offset_of!(Cyw43, ap_ssid_len),
    offset_of!(Cyw43, ap_key_len),
    offset_of!(Cyw43, ap_ssid),
    offset_of!(Cyw43, ap_key),
    offset_of!(Cyw43, netif_opaque),
    offset_of!(Cyw43, dhcp_client_opaque),
    offset_of!(Cyw43, mac),
];

/// Сколько первых полей совпадают с таблицей цели на этой сборке:
/// до указателей — всегда, на 32-битной цели — все.
/// Leading fields that must match the target table on this build: the
/// pointer-free prefix everywhere, every field on a 32-bit target.
const MATCHING_FIELDS: usize =
    if size_of::<usize>() == TARGET_POINTER_BYTES { FIELD_COUNT } else { 6 };

const _: () = {
    let mut i = 0;
    while i < MATCHING_FIELDS {
        assert!(BUILD_OFFSETS[i] == TARGET_LAYOUT.0[i].1);
        i += 1;
    }
};

#[cfg(target_pointer_width = "32")]
const_assert_eq!(size_of::<Cyw43>(), TARGET_SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Box<Cyw43> {
        // SAFETY: all-zero is valid for every field (None, false, null)
        Box::new(unsafe { core::mem::zeroed() })
    }

    #[test]
    fn long_ssid_is_truncated_in_place() {
        let mut state = blank();
        state.ap_key = [0xAA; AP_KEY_MAX];
        state.ap_channel = 6;
        state.ap_key_len = 9;

        let input: Vec<u8> = (0..40u8).collect();
        assert_eq!(state.set_ap_ssid(&input), Err(Error::Range));

        assert_eq!(state.ap_ssid_len, 32);
        assert_eq!(state.ap_ssid(), &input[..32]);
        // соседние поля не тронуты / neighbours untouched
        assert_eq!(state.ap_key, [0xAA; AP_KEY_MAX]);
        assert_eq!(state.ap_key_len, 9);
        assert_eq!(state.ap_channel, 6);
    }

    #[test]
    fn short_ssid_and_password_fit() {
        let mut state = blank();
        assert_eq!(state.set_ap_ssid(b"picobridge"), Ok(()));
        assert_eq!(state.ap_ssid(), b"picobridge");
        assert_eq!(state.set_ap_password(b"hunter22"), Ok(()));
        assert_eq!(state.ap_password(), b"hunter22");
    }

    #[test]
    fn long_password_is_truncated() {
        let mut state = blank();
        let key = [b'k'; 70];
        assert_eq!(state.set_ap_password(&key), Err(Error::Range));
        assert_eq!(state.ap_password().len(), AP_KEY_MAX);
        assert_eq!(state.ap_key_len, 64);
    }

    #[test]
    fn channel_and_auth_round_through_fields() {
        let mut state = blank();
        state.set_ap_channel(11);
        state.set_ap_auth(AuthMode::Wpa2AesPsk);
        assert_eq!(state.ap_channel(), 11);
        assert_eq!(state.ap_auth_raw(), 0x0040_0004);
        assert_eq!(state.ap_auth(), Some(AuthMode::Wpa2AesPsk));

        state.set_ap_channel(0x1_0003);
        assert_eq!(state.ap_channel(), 3);
    }

    #[test]
    fn flag_reads_follow_raw_fields() {
        let mut state = blank();
        assert!(!state.is_initialized());
        assert!(!state.scan_active());
        state.initted = true;
        state.wifi_scan_state = 1;
        state.itf_state = 1 << Interface::Ap.raw();
        assert!(state.is_initialized());
        assert!(state.scan_active());
        assert!(state.is_interface_up(Interface::Ap));
        assert!(!state.is_interface_up(Interface::Sta));
        state.wifi_scan_state = 2;
        assert!(!state.scan_active());
    }

    #[test]
    fn link_status_decoding() {
        assert_eq!(LinkStatus::from_raw(3), LinkStatus::Up);
        assert_eq!(LinkStatus::from_raw(-3), LinkStatus::BadAuth);
        assert_eq!(LinkStatus::from_raw(42), LinkStatus::Unknown(42));
        assert!(LinkStatus::Up.is_up());
        assert!(!LinkStatus::NoIp.is_up());
    }

    #[test]
    fn scan_result_ssid_is_bounded() {
        let mut result = ScanResult::default();
        result.ssid[..4].copy_from_slice(b"home");
        result.ssid_len = 4;
        assert_eq!(result.ssid(), b"home");
        result.ssid_len = 200;
        assert_eq!(result.ssid().len(), 32);
    }

    #[test]
    fn scan_options_for_ssid() {
        let opts = ScanOptions::for_ssid(b"office");
        assert_eq!(opts.ssid_len, 6);
        assert_eq!(&opts.ssid[..6], b"office");
    }

    #[test]
    fn offset_table_is_the_target_layout() {
        assert_eq!(field_offset("itf_state"), Some(2128));
        assert_eq!(field_offset("wifi_scan_cb"), Some(2148));
        assert_eq!(field_offset("mac"), Some(2443));
        assert_eq!(field_offset("nope"), None);
        let mut last = 0;
        for &(_, offset) in FIELD_OFFSETS {
            assert!(offset >= last);
            last = offset;
        }
        assert_eq!(FIELD_OFFSETS.len(), BUILD_OFFSETS.len());
        assert_eq!(TARGET_SIZE, 2452);
    }
}
