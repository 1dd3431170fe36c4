//! Hidden message-only window that receives `WM_INPUT`.
//!
//! [`WindowSource`] owns three OS resources, released in reverse order by
//! [`close`](EventSource::close):
//! 1. a window class registration (name suffixed per instance),
//! 2. an `HWND_MESSAGE` window using that class,
//! 3. the raw input registration targeting that window.
//!
//! The window procedure never touches slots. It parses the payload, stamps it with
//! `GetTickCount64` and pushes it onto a queue owned by the source (reached through
//! `GWLP_USERDATA`). [`pump`](EventSource::pump) dispatches this window's pending
//! messages and then drains that queue.
//!
//! The window belongs to the thread that created it, so all polling must happen on
//! that thread. `WindowSource` is `!Send` for that reason.
//!
//! Raw input registration is per process and per usage: if two sources capture the
//! same device class, the most recently opened one receives the input.

use super::raw_input::read_wm_input;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::packet::StampedPacket;
use crate::source::EventSource;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use windows_sys::Win32::Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::System::SystemInformation::GetTickCount64;
use windows_sys::Win32::UI::Input::{
    GetRegisteredRawInputDevices, RegisterRawInputDevices, RAWINPUTDEVICE, RIDEV_INPUTSINK,
    RIDEV_REMOVE,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetWindowLongPtrW,
    PeekMessageW, RegisterClassExW, SetWindowLongPtrW, TranslateMessage, UnregisterClassW,
    GWLP_USERDATA, HWND_MESSAGE, MSG, PM_REMOVE, WM_INPUT, WNDCLASSEXW,
};

const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;
const USAGE_MOUSE: u16 = 0x02;
const USAGE_KEYBOARD: u16 = 0x06;

static NEXT_CLASS_ID: AtomicUsize = AtomicUsize::new(0);

type PacketQueue = RefCell<VecDeque<StampedPacket>>;

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(core::iter::once(0)).collect()
}

/// Queue attached to `hwnd`, or null once the source has detached it.
unsafe fn attached_queue(hwnd: HWND) -> *const PacketQueue {
    // Via `usize`: on 32-bit targets the Ptr variants are the i32 `*WindowLongW` calls.
    GetWindowLongPtrW(hwnd, GWLP_USERDATA) as usize as *const PacketQueue
}

/// Push a packet onto the queue attached to `hwnd`. Returns `false` if it was dropped.
unsafe fn enqueue(hwnd: HWND, stamped: StampedPacket) -> bool {
    let queue = attached_queue(hwnd);
    if queue.is_null() {
        return false;
    }
    match (*queue).try_borrow_mut() {
        Ok(mut q) => {
            q.push_back(stamped);
            true
        }
        Err(_) => {
            log::warn!("dropping raw input packet: queue busy");
            false
        }
    }
}

unsafe extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == WM_INPUT {
        if let Some(packet) = read_wm_input(lparam) {
            enqueue(hwnd, StampedPacket { at: GetTickCount64(), packet });
        }
    }
    // WM_INPUT still goes to DefWindowProc so the system can clean up after RIM_INPUT.
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

pub struct WindowSource {
    hwnd: HWND,
    hinstance: HINSTANCE,
    class_name: Vec<u16>,
    class_registered: bool,
    usages: Vec<u16>,
    queue: Box<PacketQueue>,
}

impl WindowSource {
    /// Register the class, create the window and ask for raw input.
    ///
    /// On error every resource acquired so far is released again.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let id = NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed);
        let class = format!("{}-{}", config.class_name, id);

        let mut usages = Vec::with_capacity(2);
        if config.mouse {
            usages.push(USAGE_MOUSE);
        }
        if config.keyboard {
            usages.push(USAGE_KEYBOARD);
        }

        let mut src = WindowSource {
            hwnd: core::ptr::null_mut(),
            hinstance: unsafe { GetModuleHandleW(core::ptr::null()) },
            class_name: wide(&class),
            class_registered: false,
            usages: Vec::new(),
            queue: Box::new(RefCell::new(VecDeque::new())),
        };

        // Early returns drop `src`, which closes whatever was acquired.
        src.register_class(&class)?;
        src.create_window()?;
        src.register_devices(&usages, config.background)?;

        log::debug!(
            "raw input window {:?} ({}) capturing mouse={} keyboard={} background={}",
            src.hwnd,
            class,
            config.mouse,
            config.keyboard,
            config.background
        );
        Ok(src)
    }

    fn register_class(&mut self, class: &str) -> Result<()> {
        let mut wc: WNDCLASSEXW = unsafe { core::mem::zeroed() };
        wc.cbSize = core::mem::size_of::<WNDCLASSEXW>() as u32;
        wc.lpfnWndProc = Some(wndproc);
        wc.hInstance = self.hinstance;
        wc.lpszClassName = self.class_name.as_ptr();

        if unsafe { RegisterClassExW(&wc) } == 0 {
            return Err(Error::RegisterClass {
                class: class.to_string(),
                code: unsafe { GetLastError() },
            });
        }
        self.class_registered = true;
        Ok(())
    }

    fn create_window(&mut self) -> Result<()> {
        let hwnd = unsafe {
            CreateWindowExW(
                0,
                self.class_name.as_ptr(),
                core::ptr::null(),
                0,
                0,
                0,
                0,
                0,
                HWND_MESSAGE,
                core::ptr::null_mut(),
                self.hinstance,
                core::ptr::null(),
            )
        };
        if hwnd.is_null() {
            return Err(Error::CreateWindow(unsafe { GetLastError() }));
        }
        self.hwnd = hwnd;

        let queue: *const PacketQueue = &*self.queue;
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, queue as usize as _) };
        Ok(())
    }

    fn register_devices(&mut self, usages: &[u16], background: bool) -> Result<()> {
        let flags = if background { RIDEV_INPUTSINK } else { 0 };
        let rids: Vec<RAWINPUTDEVICE> = usages
            .iter()
            .map(|&usage| RAWINPUTDEVICE {
                usUsagePage: USAGE_PAGE_GENERIC_DESKTOP,
                usUsage: usage,
                dwFlags: flags,
                hwndTarget: self.hwnd,
            })
            .collect();

        let ok = unsafe {
            RegisterRawInputDevices(
                rids.as_ptr(),
                rids.len() as u32,
                core::mem::size_of::<RAWINPUTDEVICE>() as u32,
            )
        };
        if ok == 0 {
            return Err(Error::RegisterDevices(unsafe { GetLastError() }));
        }
        self.usages = usages.to_vec();
        Ok(())
    }

    /// Usages from our set whose registration still targets this window.
    ///
    /// Another source opened later may have taken them over; those are left alone.
    fn owned_usages(&self) -> Vec<u16> {
        let cb = core::mem::size_of::<RAWINPUTDEVICE>() as u32;
        let mut count: u32 = 0;
        unsafe { GetRegisteredRawInputDevices(core::ptr::null_mut(), &mut count, cb) };
        if count == 0 {
            return Vec::new();
        }

        let mut regs: Vec<RAWINPUTDEVICE> = vec![unsafe { core::mem::zeroed() }; count as usize];
        let n = unsafe { GetRegisteredRawInputDevices(regs.as_mut_ptr(), &mut count, cb) };
        if n == u32::MAX {
            log::warn!("GetRegisteredRawInputDevices failed (os error {})", unsafe {
                GetLastError()
            });
            return Vec::new();
        }
        regs.truncate(n as usize);

        self.usages
            .iter()
            .copied()
            .filter(|&usage| {
                regs.iter().any(|r| {
                    r.usUsagePage == USAGE_PAGE_GENERIC_DESKTOP
                        && r.usUsage == usage
                        && r.hwndTarget == self.hwnd
                })
            })
            .collect()
    }

    fn unregister_devices(&mut self) {
        let owned = self.owned_usages();
        self.usages.clear();
        if owned.is_empty() {
            return;
        }

        let rids: Vec<RAWINPUTDEVICE> = owned
            .iter()
            .map(|&usage| RAWINPUTDEVICE {
                usUsagePage: USAGE_PAGE_GENERIC_DESKTOP,
                usUsage: usage,
                dwFlags: RIDEV_REMOVE,
                hwndTarget: core::ptr::null_mut(),
            })
            .collect();
        let ok = unsafe {
            RegisterRawInputDevices(
                rids.as_ptr(),
                rids.len() as u32,
                core::mem::size_of::<RAWINPUTDEVICE>() as u32,
            )
        };
        if ok == 0 {
            log::warn!("failed to remove raw input registration (os error {})", unsafe {
                GetLastError()
            });
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl EventSource for WindowSource {
    fn pump(&mut self, sink: &mut dyn FnMut(StampedPacket)) {
        if self.hwnd.is_null() {
            return;
        }

        let mut msg: MSG = unsafe { core::mem::zeroed() };
        while unsafe { PeekMessageW(&mut msg, self.hwnd, 0, 0, PM_REMOVE) } != 0 {
            unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        // The window procedure has finished with the queue by now.
        let drained: Vec<StampedPacket> = self.queue.borrow_mut().drain(..).collect();
        for packet in drained {
            sink(packet);
        }
    }

    fn close(&mut self) {
        if !self.usages.is_empty() {
            self.unregister_devices();
        }

        if !self.hwnd.is_null() {
            unsafe {
                SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
                if DestroyWindow(self.hwnd) == 0 {
                    log::warn!("DestroyWindow failed (os error {})", GetLastError());
                }
            }
            self.hwnd = core::ptr::null_mut();
        }

        if self.class_registered {
            if unsafe { UnregisterClassW(self.class_name.as_ptr(), self.hinstance) } == 0 {
                log::warn!("UnregisterClassW failed (os error {})", unsafe { GetLastError() });
            }
            self.class_registered = false;
        }

        self.queue.borrow_mut().clear();
    }

    fn is_open(&self) -> bool {
        !self.hwnd.is_null()
    }
}

impl Drop for WindowSource {
    fn drop(&mut self) {
        self.close();
    }
}
