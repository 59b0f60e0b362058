//! Linux fbdev implementation
//!
//! Opens a framebuffer device, asks the kernel for its geometry and maps the
//! visible pixel memory into the process.
//!
//! # References
//!
//! - Framebuffer API: https://www.kernel.org/doc/html/latest/fb/api.html
//! - linux/fb.h: `struct fb_var_screeninfo`, `struct fb_fix_screeninfo`,
//!   `FBIOGET_VSCREENINFO`, `FBIOGET_FSCREENINFO`

use std::fs::{File, OpenOptions};
use std::num::NonZeroUsize;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use nix::errno::Errno;
use nix::libc::{c_ulong, c_void};
use nix::sys::mman::{mmap, munmap, MapFlags, ProtFlags};
use tracing::{debug, warn};

use super::FbInfo;
use crate::core::{Rgb565, Surface};
use crate::error::{Error, Result};

const FBIOGET_VSCREENINFO: u32 = 0x4600;
const FBIOGET_FSCREENINFO: u32 = 0x4602;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
#[allow(dead_code)]
pub struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// `struct fb_var_screeninfo`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
#[allow(dead_code)]
pub struct FbVarScreeninfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// `struct fb_fix_screeninfo`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
#[allow(dead_code)]
pub struct FbFixScreeninfo {
    id: [u8; 16],
    smem_start: c_ulong,
    smem_len: u32,
    type_: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

nix::ioctl_read_bad!(fbioget_vscreeninfo, FBIOGET_VSCREENINFO, FbVarScreeninfo);
nix::ioctl_read_bad!(fbioget_fscreeninfo, FBIOGET_FSCREENINFO, FbFixScreeninfo);

/// Where the visible screen sits in device memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Byte offset of the first visible pixel
    start: usize,
    /// Bytes of visible pixels from `start`
    len: usize,
}

/// Check that the visible screen is one contiguous run of `xres * yres`
/// pixels and find it in device memory.
fn visible_layout(var: &FbVarScreeninfo, fix: &FbFixScreeninfo) -> Result<Layout> {
    let pixel = std::mem::size_of::<Rgb565>();
    let row = var.xres as usize * pixel;
    let line_length = fix.line_length as usize;

    if line_length != row {
        return Err(Error::UnsupportedLayout(format!(
            "line length {} bytes, expected {} ({} pixels)",
            line_length, row, var.xres
        )));
    }
    if var.xoffset != 0 {
        return Err(Error::UnsupportedLayout(format!(
            "horizontal panning offset {}",
            var.xoffset
        )));
    }

    let start = var.yoffset as usize * line_length;
    let len = row * var.yres as usize;
    let end = start.saturating_add(len);
    if len == 0 || end > fix.smem_len as usize {
        return Err(Error::UnsupportedLayout(format!(
            "visible bytes {}..{} outside {} bytes of video memory",
            start, end, fix.smem_len
        )));
    }

    Ok(Layout { start, len })
}

/// A memory-mapped 16 bpp framebuffer device.
///
/// Rows must be exactly `width` pixels apart; drivers that pad their lines
/// are rejected with [`Error::UnsupportedLayout`]. A vertically panned
/// screen is found through `yoffset`. The mapping is released and the
/// device closed when the value is dropped.
pub struct Framebuffer {
    file: File,
    map: *mut c_void,
    map_len: usize,
    layout: Layout,
    info: FbInfo,
}

impl Framebuffer {
    /// Open and map the device at `path` (usually `/dev/fb0`)
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        let mut vinfo = FbVarScreeninfo::default();
        // SAFETY: the fd is open for the duration of the call and `vinfo` has
        // the kernel's `fb_var_screeninfo` layout.
        unsafe { fbioget_vscreeninfo(file.as_raw_fd(), &mut vinfo) }.map_err(Error::Device)?;

        let mut finfo = FbFixScreeninfo::default();
        // SAFETY: as above, for `fb_fix_screeninfo`.
        unsafe { fbioget_fscreeninfo(file.as_raw_fd(), &mut finfo) }.map_err(Error::Device)?;

        if vinfo.bits_per_pixel != 16 {
            return Err(Error::UnsupportedDepth(vinfo.bits_per_pixel));
        }

        let info = FbInfo {
            width: vinfo.xres as usize,
            height: vinfo.yres as usize,
            bits_per_pixel: vinfo.bits_per_pixel,
        };

        let layout = visible_layout(&vinfo, &finfo)?;
        let map_len = layout.start + layout.len;
        let length = NonZeroUsize::new(map_len).ok_or(Error::Device(Errno::EINVAL))?;

        // SAFETY: a fresh shared mapping of the device; nothing else in this
        // process aliases it.
        let map = unsafe {
            mmap(
                None,
                length,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                Some(&file),
                0,
            )
        }
        .map_err(Error::Device)?;

        let fb = Self {
            file,
            map,
            map_len,
            layout,
            info,
        };

        // `pixels()` casts unchecked from here on
        bytemuck::try_cast_slice::<u8, Rgb565>(fb.bytes())
            .map_err(|_| Error::Device(Errno::EFAULT))?;

        debug!(
            path = %path.display(),
            width = fb.info.width,
            height = fb.info.height,
            bpp = fb.info.bits_per_pixel,
            "mapped framebuffer"
        );

        Ok(fb)
    }

    /// Device geometry
    pub fn info(&self) -> FbInfo {
        self.info
    }

    fn bytes(&self) -> &[u8] {
        // SAFETY: `map` points at `map_len` mapped bytes that live until drop,
        // and `layout` lies inside them.
        unsafe {
            let start = (self.map as *const u8).add(self.layout.start);
            std::slice::from_raw_parts(start, self.layout.len)
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` makes this the only live view.
        unsafe {
            let start = (self.map as *mut u8).add(self.layout.start);
            std::slice::from_raw_parts_mut(start, self.layout.len)
        }
    }
}

impl Surface for Framebuffer {
    fn width(&self) -> usize {
        self.info.width
    }

    fn height(&self) -> usize {
        self.info.height
    }

    fn pixels(&self) -> &[Rgb565] {
        bytemuck::cast_slice(self.bytes())
    }

    fn pixels_mut(&mut self) -> &mut [Rgb565] {
        bytemuck::cast_slice_mut(self.bytes_mut())
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        // SAFETY: `map`/`map_len` are exactly what mmap returned and are not
        // used after this point.
        if let Err(e) = unsafe { munmap(self.map, self.map_len) } {
            warn!("Failed to unmap framebuffer: {}", e);
        }
        debug!(fd = self.file.as_raw_fd(), "closing framebuffer");
    }
}
