//! Тестовый двойник драйвера CYW43 / Test double for the CYW43 driver
//!
//! Те же имена, что в `ffi`; вызовы записываются в журнал потока.
//! Same names as `ffi`; calls are recorded in a per-thread log.

use std::cell::{Cell, RefCell};
use std::ffi::CStr;

use core::ffi::{c_char, c_int, c_uint, c_void};

use libpicobridge::cyw43::{self, Cyw43, ScanOptions, ScanResult, ScanResultCallback, MAC_LEN};

#[allow(non_upper_case_globals)]
pub static mut cyw43_state: Cyw43 = unsafe { core::mem::zeroed() };

pub const TEST_MAC: [u8; MAC_LEN] = [0x28, 0xCD, 0xC1, 0x00, 0x00, 0x01];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init,
    Deinit,
    Poll,
    EnableSta,
    DisableSta,
    EnableAp { ssid: Vec<u8>, password: Vec<u8>, auth: u32 },
    DisableAp,
    Connect { ssid: Vec<u8>, password: Vec<u8>, auth: u32 },
    Send { itf: c_int, frame: Vec<u8> },
    Multicast { addr: [u8; MAC_LEN], add: bool },
    Scan { ssid_len: u32 },
}

thread_local! {
    static CALLS:       RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
    static RESULT:      Cell<c_int> = const { Cell::new(0) };
    static LINK:        Cell<c_int> = const { Cell::new(0) };
    static LED:         Cell<bool> = const { Cell::new(false) };
    static SCAN_SSIDS:  RefCell<Vec<&'static [u8]>> = const { RefCell::new(Vec::new()) };
    static DELIVERED:   Cell<usize> = const { Cell::new(0) };
}

/// Забрать журнал вызовов / Take the call log
pub fn take_calls() -> Vec<Call> {
    CALLS.with(|calls| core::mem::take(&mut *calls.borrow_mut()))
}

/// Код возврата следующих вызовов, возвращающих `int`.
pub fn set_result(code: c_int) {
    RESULT.with(|r| r.set(code));
}

pub fn set_link_status(raw: c_int) {
    LINK.with(|l| l.set(raw));
}

/// BSS, которые «найдёт» следующее сканирование.
pub fn set_scan_results(ssids: &[&'static [u8]]) {
    SCAN_SSIDS.with(|s| *s.borrow_mut() = ssids.to_vec());
}

/// Сколько BSS отдало последнее сканирование / BSS delivered by the last scan
pub fn delivered() -> usize {
    DELIVERED.with(|d| d.get())
}

fn record(call: Call) {
    CALLS.with(|calls| calls.borrow_mut().push(call));
}

fn result() -> c_int {
    RESULT.with(|r| r.get())
}

unsafe fn bytes(text: *const c_char) -> Vec<u8> {
    // SAFETY: the bridge always passes NUL-terminated buffers
    unsafe { CStr::from_ptr(text) }.to_bytes().to_vec()
}

pub unsafe fn cyw43_arch_init() -> c_int {
    record(Call::Init);
    result()
}

pub unsafe fn cyw43_arch_deinit() {
    record(Call::Deinit);
}

pub unsafe fn cyw43_arch_poll() {
    record(Call::Poll);
}

pub unsafe fn cyw43_arch_enable_sta_mode() {
    record(Call::EnableSta);
}

pub unsafe fn cyw43_arch_disable_sta_mode() {
    record(Call::DisableSta);
}

pub unsafe fn cyw43_arch_enable_ap_mode(ssid: *const c_char, password: *const c_char, auth: u32) {
    // SAFETY: see `bytes`
    let (ssid, password) = unsafe { (bytes(ssid), bytes(password)) };
    record(Call::EnableAp { ssid, password, auth });
}

pub unsafe fn cyw43_arch_disable_ap_mode() {
    record(Call::DisableAp);
}

pub unsafe fn cyw43_arch_wifi_connect_async(
    ssid: *const c_char,
    password: *const c_char,
    auth: u32,
) -> c_int {
    // SAFETY: see `bytes`
    let (ssid, password) = unsafe { (bytes(ssid), bytes(password)) };
    record(Call::Connect { ssid, password, auth });
    result()
}

pub unsafe fn cyw43_arch_gpio_put(_wl_gpio: c_uint, value: bool) {
    LED.with(|led| led.set(value));
}

pub unsafe fn cyw43_arch_gpio_get(_wl_gpio: c_uint) -> bool {
    LED.with(|led| led.get())
}

pub unsafe fn cyw43_send_ethernet(
    _state: *mut Cyw43,
    itf: c_int,
    len: usize,
    buf: *const c_void,
    _is_pbuf: bool,
) -> c_int {
    // SAFETY: the bridge passes a live slice of `len` bytes
    let frame = unsafe { core::slice::from_raw_parts(buf.cast::<u8>(), len) }.to_vec();
    record(Call::Send { itf, frame });
    result()
}

pub unsafe fn cyw43_wifi_get_mac(_state: *mut Cyw43, _itf: c_int, mac: *mut u8) -> c_int {
    // SAFETY: the bridge passes a 6-byte buffer
    unsafe { core::ptr::copy_nonoverlapping(TEST_MAC.as_ptr(), mac, MAC_LEN) };
    result()
}

pub unsafe fn cyw43_wifi_link_status(_state: *mut Cyw43, _itf: c_int) -> c_int {
    LINK.with(|l| l.get())
}

pub unsafe fn cyw43_wifi_update_multicast_filter(
    _state: *mut Cyw43,
    addr: *mut u8,
    add: bool,
) -> c_int {
    let mut copy = [0; MAC_LEN];
    // SAFETY: the bridge passes a 6-byte buffer
    unsafe { core::ptr::copy_nonoverlapping(addr, copy.as_mut_ptr(), MAC_LEN) };
    record(Call::Multicast { addr: copy, add });
    result()
}

/// Помечает сканирование активным и синхронно отдаёт все заданные BSS,
/// не глядя на код возврата callback.
/// Marks the scan active and delivers the whole preset BSS list
/// synchronously, ignoring the callback's return code.
pub unsafe fn cyw43_wifi_scan(
    state: *mut Cyw43,
    opts: *mut ScanOptions,
    env: *mut c_void,
    result_cb: ScanResultCallback,
) -> c_int {
    // SAFETY: the bridge passes live options
    let ssid_len = unsafe { (*opts).ssid_len };
    record(Call::Scan { ssid_len });
    let code = result();
    if code != 0 {
        return code;
    }
    if let Some(offset) = cyw43::field_offset("wifi_scan_state") {
        // SAFETY: the scan-state word sits at the same offset on every width
        unsafe { state.cast::<u8>().add(offset).cast::<u32>().write_volatile(1) };
    }
    let ssids = SCAN_SSIDS.with(|s| s.borrow().clone());
    DELIVERED.with(|d| d.set(0));
    for ssid in ssids {
        let mut found = ScanResult::default();
        found.ssid[..ssid.len()].copy_from_slice(ssid);
        found.ssid_len = ssid.len() as u8;
        // SAFETY: env and callback were registered together by the bridge
        unsafe { result_cb(env, &found) };
        DELIVERED.with(|d| d.set(d.get() + 1));
    }
    0
}
