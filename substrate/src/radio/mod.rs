//! Радио CYW43 и мост драйвер ↔ стек / CYW43 radio and the driver/stack bridge
//!
//! Состояние `cyw43_state` принадлежит драйверу и существует в одном
//! экземпляре. `Radio` — единственный владелец ссылки на него:
//! `Radio::take()` отдаёт его ровно один раз за процесс.
//!
//! The driver-owned `cyw43_state` exists once. `Radio` is the single
//! owner of the reference to it; `Radio::take()` hands it out exactly
//! once per process. Nothing here locks: driver internals, the stack and
//! this handle all touch the state from the one core, and the driver
//! masks interrupts around its own writes. `Radio` is neither `Send`
//! nor `Sync`.

use core::ffi::{c_uint, c_void, CStr};
use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicBool, Ordering};

use libpicobridge::cyw43::{
    self, AuthMode, Cyw43, Interface, LinkStatus, ScanOptions, AP_KEY_MAX, AP_SSID_MAX, MAC_LEN,
};
use libpicobridge::netcfg::WifiSecurity;
use libpicobridge::{Error, PicoError, Result};
use log::{debug, info, warn};

pub mod scan;

#[cfg(not(test))]
mod ffi;

#[cfg(test)]
pub(crate) mod fake;
#[cfg(test)]
use fake as ffi;

pub use scan::{ScanControl, ScanHandler, ScanSession};

/// `CYW43_WL_GPIO_LED_PIN`: светодиод платы висит на GPIO радио.
pub const LED_PIN: c_uint = 0;

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Параметры точки доступа / Soft-AP parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftApConfig<'a> {
    pub ssid:     &'a str,
    pub password: &'a str,
    pub security: WifiSecurity,
    pub channel:  u32,
}

pub struct Radio {
    state: NonNull<Cyw43>,
}

impl Radio {
    /// Взять радио. Второй вызов вернёт `None`.
    /// Take the radio; any later call returns `None`.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        // SAFETY: only the address is taken; the flag above makes this the
        // sole handle to the driver's instance
        let state = unsafe { ptr::addr_of_mut!(ffi::cyw43_state) };
        NonNull::new(state).map(|state| Self { state })
    }

    /// # Safety
    /// `state` must be the driver's instance (or a layout-identical stand-in)
    /// with no other live handle.
    pub unsafe fn from_raw(state: NonNull<Cyw43>) -> Self {
        Self { state }
    }

    /// Поля состояния только для чтения / Read-only view of the state fields
    pub fn state(&self) -> &Cyw43 {
        // SAFETY: single owner, single core
        unsafe { self.state.as_ref() }
    }

    fn state_mut(&mut self) -> &mut Cyw43 {
        // SAFETY: as above
        unsafe { self.state.as_mut() }
    }

    fn raw(&self) -> *mut Cyw43 {
        self.state.as_ptr()
    }

    // ── Жизненный цикл / Lifecycle ──────────────────────────────────────────

    pub fn init(&mut self) -> Result<()> {
        // SAFETY: driver bring-up, no preconditions
        let code = unsafe { ffi::cyw43_arch_init() };
        match PicoError::check(code) {
            Ok(()) => {
                info!("radio up");
                Ok(())
            }
            Err(err) => {
                warn!("cyw43_arch_init failed: {}", code);
                Err(err)
            }
        }
    }

    pub fn deinit(&mut self) {
        // SAFETY: driver teardown
        unsafe { ffi::cyw43_arch_deinit() };
    }

    /// Обработать события драйвера; звать из главного цикла.
    /// Service driver events; call from the main loop.
    pub fn poll(&mut self) {
        // SAFETY: driver poll, single core
        unsafe { ffi::cyw43_arch_poll() };
    }

    // ── Режимы / Modes ──────────────────────────────────────────────────────

    pub fn enable_sta_mode(&mut self) {
        // SAFETY: driver mode switch
        unsafe { ffi::cyw43_arch_enable_sta_mode() };
    }

    pub fn disable_sta_mode(&mut self) {
        // SAFETY: driver mode switch
        unsafe { ffi::cyw43_arch_disable_sta_mode() };
    }

    /// Поднять точку доступа.
    ///
    /// Channel, SSID, key and auth go through the placeholder accessors
    /// first. An over-long SSID or key is truncated to its field and
    /// logged, then the AP starts with the stored values. Security without
    /// a driver auth mode (WEP) or a NUL inside SSID/key is rejected
    /// before anything is written.
    pub fn enable_ap_mode(&mut self, config: &SoftApConfig<'_>) -> Result<()> {
        let auth = config.security.auth_mode().ok_or(Error::InvalidArgument)?;
        if config.ssid.bytes().any(|b| b == 0) || config.password.bytes().any(|b| b == 0) {
            return Err(Error::InvalidArgument);
        }

        let state = self.state_mut();
        state.set_ap_channel(config.channel);
        if state.set_ap_ssid(config.ssid.as_bytes()).is_err() {
            warn!("ap ssid truncated to {} bytes", AP_SSID_MAX);
        }
        if state.set_ap_password(config.password.as_bytes()).is_err() {
            warn!("ap password truncated to {} bytes", AP_KEY_MAX);
        }
        state.set_ap_auth(auth);

        let mut ssid = [0u8; AP_SSID_MAX + 1];
        let mut key = [0u8; AP_KEY_MAX + 1];
        let ssid = nul_terminated(self.state().ap_ssid(), &mut ssid)?;
        let key = nul_terminated(self.state().ap_password(), &mut key)?;

        info!("soft-ap {:?} on channel {}", config.ssid, self.state().ap_channel());
        // SAFETY: both strings are NUL-terminated locals alive for the call
        unsafe { ffi::cyw43_arch_enable_ap_mode(ssid.as_ptr(), key.as_ptr(), auth.raw()) };
        Ok(())
    }

    pub fn disable_ap_mode(&mut self) {
        // SAFETY: driver mode switch
        unsafe { ffi::cyw43_arch_disable_ap_mode() };
    }

    /// Начать подключение к сети; результат — через `link_status`.
    /// Start an asynchronous join; watch `link_status` for the outcome.
    pub fn connect(&mut self, ssid: &[u8], password: &[u8], auth: AuthMode) -> Result<()> {
        let mut ssid_buf = [0u8; AP_SSID_MAX + 1];
        let mut key_buf = [0u8; AP_KEY_MAX + 1];
        let ssid = nul_terminated(ssid, &mut ssid_buf)?;
        let key = nul_terminated(password, &mut key_buf)?;

        debug!("joining {:?}", ssid);
        // SAFETY: both strings are NUL-terminated locals alive for the call
        let code = unsafe {
            ffi::cyw43_arch_wifi_connect_async(ssid.as_ptr(), key.as_ptr(), auth.raw())
        };
        PicoError::check(code)
    }

    // ── Вызовы стека в драйвер / Stack-to-driver calls ──────────────────────

    pub fn link_status(&self, itf: Interface) -> LinkStatus {
        // SAFETY: live state pointer
        LinkStatus::from_raw(unsafe { ffi::cyw43_wifi_link_status(self.raw(), itf.raw()) })
    }

    pub fn mac(&self, itf: Interface) -> Result<[u8; MAC_LEN]> {
        let mut mac = [0u8; MAC_LEN];
        // SAFETY: live state pointer, 6-byte out buffer
        let code = unsafe { ffi::cyw43_wifi_get_mac(self.raw(), itf.raw(), mac.as_mut_ptr()) };
        PicoError::check(code).map(|()| mac)
    }

    /// Отправить Ethernet-кадр / Send one Ethernet frame
    pub fn send_ethernet(&mut self, itf: Interface, frame: &[u8]) -> Result<()> {
        // SAFETY: `frame` outlives the call; not a pbuf
        let code = unsafe {
            ffi::cyw43_send_ethernet(
                self.raw(),
                itf.raw(),
                frame.len(),
                frame.as_ptr().cast::<c_void>(),
                false,
            )
        };
        PicoError::check(code)
    }

    pub fn update_multicast_filter(&mut self, addr: [u8; MAC_LEN], add: bool) -> Result<()> {
        let mut addr = addr;
        // SAFETY: live state pointer, 6-byte buffer
        let code = unsafe {
            ffi::cyw43_wifi_update_multicast_filter(self.raw(), addr.as_mut_ptr(), add)
        };
        PicoError::check(code)
    }

    /// Запустить сканирование.
    ///
    /// The driver keeps `session` until the scan finishes, hence
    /// `'static`. Results arrive from `poll()`; once the handler returns
    /// `Stop`, later results are dropped here whatever the driver does.
    pub fn start_scan<H: ScanHandler>(
        &mut self,
        options: &ScanOptions,
        session: &'static mut ScanSession<H>,
    ) -> Result<()> {
        let mut options = *options;
        session.restart();
        let env = (session as *mut ScanSession<H>).cast::<c_void>();
        debug!("scan start");
        // SAFETY: env matches the trampoline's handler type and lives forever
        let code = unsafe {
            ffi::cyw43_wifi_scan(self.raw(), &mut options, env, scan::trampoline::<H>)
        };
        PicoError::check(code)
    }

    pub fn scan_active(&self) -> bool {
        self.state().scan_active()
    }

    // ── Светодиод / LED ─────────────────────────────────────────────────────

    pub fn set_led(&mut self, on: bool) {
        // SAFETY: radio GPIO write
        unsafe { ffi::cyw43_arch_gpio_put(LED_PIN, on) };
    }

    pub fn led(&self) -> bool {
        // SAFETY: radio GPIO read
        unsafe { ffi::cyw43_arch_gpio_get(LED_PIN) }
    }
}

/// Скопировать `src` в `buf` и завершить NUL. Внутренний NUL или
/// нехватка места — `InvalidArgument`.
fn nul_terminated<'a>(src: &[u8], buf: &'a mut [u8]) -> Result<&'a CStr> {
    if src.len() >= buf.len() || src.contains(&0) {
        return Err(Error::InvalidArgument);
    }
    let (len, _) = cyw43::copy_bounded(buf, src);
    buf[len] = 0;
    CStr::from_bytes_with_nul(&buf[..=len]).map_err(|_| Error::InvalidArgument)
}
