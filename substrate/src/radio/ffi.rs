//! Символы драйвера CYW43 и точки входа стека
//! CYW43 driver symbols and the network stack's entry points
//!
//! Обе стороны — плоский контракт линковщика, по одной реализации на
//! процесс. Имена и сигнатуры должны совпадать точно.
//! Both directions are a flat linker contract with one implementation
//! per process; names and signatures must match exactly.

use core::ffi::{c_char, c_int, c_uint, c_void};

use libpicobridge::cyw43::{
    Cyw43, LinkChangeCallback, ProcessEthernetCallback, ScanOptions, ScanResultCallback,
};

// ── Драйвер / Driver (pico_cyw43_arch, cyw43_driver) ────────────────────────

extern "C" {
    /// Единственный экземпляр состояния, принадлежит драйверу.
    pub static mut cyw43_state: Cyw43;

    pub fn cyw43_arch_init() -> c_int;
    pub fn cyw43_arch_deinit();
    pub fn cyw43_arch_poll();
    pub fn cyw43_arch_enable_sta_mode();
    pub fn cyw43_arch_disable_sta_mode();
    pub fn cyw43_arch_enable_ap_mode(ssid: *const c_char, password: *const c_char, auth: u32);
    pub fn cyw43_arch_disable_ap_mode();
    pub fn cyw43_arch_wifi_connect_async(
        ssid: *const c_char,
        password: *const c_char,
        auth: u32,
    ) -> c_int;
    pub fn cyw43_arch_gpio_put(wl_gpio: c_uint, value: bool);
    pub fn cyw43_arch_gpio_get(wl_gpio: c_uint) -> bool;

    pub fn cyw43_send_ethernet(
        state: *mut Cyw43,
        itf: c_int,
        len: usize,
        buf: *const c_void,
        is_pbuf: bool,
    ) -> c_int;
    pub fn cyw43_wifi_get_mac(state: *mut Cyw43, itf: c_int, mac: *mut u8) -> c_int;
    pub fn cyw43_wifi_link_status(state: *mut Cyw43, itf: c_int) -> c_int;
    pub fn cyw43_wifi_update_multicast_filter(state: *mut Cyw43, addr: *mut u8, add: bool) -> c_int;
    pub fn cyw43_wifi_scan(
        state: *mut Cyw43,
        opts: *mut ScanOptions,
        env: *mut c_void,
        result_cb: ScanResultCallback,
    ) -> c_int;
}

// ── Стек / Stack (built-in TCP/IP, Pico W driver glue) ──────────────────────

extern "C" {
    fn cyw43_cb_process_ethernet(cb_data: *mut c_void, itf: c_int, len: usize, buf: *const u8);
    fn cyw43_cb_tcpip_set_link_up(state: *mut Cyw43, itf: c_int);
    fn cyw43_cb_tcpip_set_link_down(state: *mut Cyw43, itf: c_int);
}

// Сигнатуры, которые драйвер ждёт от стека: расхождение не соберётся.
const _: ProcessEthernetCallback = cyw43_cb_process_ethernet;
const _: LinkChangeCallback = cyw43_cb_tcpip_set_link_up;
const _: LinkChangeCallback = cyw43_cb_tcpip_set_link_down;
