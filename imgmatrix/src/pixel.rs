// pixel.rs
//
// Copyright (c) 2025  Douglas Lau
//
use crate::{Error, Result};
use pix::rgb::SRgba8;
use std::fmt;
use std::str::FromStr;

/// Default render color, used when no palette is supplied
pub const DEFAULT_COLOR: Pixel = Pixel::new(0, 255, 0, 255);

/// RGBA pixel with 8-bit channels.
///
/// Pixels are compared byte-for-byte; no color space conversion is done.
/// The text form is `r,g,b,a`, e.g. `222,0,222,255`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel([u8; 4]);

impl Pixel {
    /// Fully transparent black
    pub const TRANSPARENT_BLACK: Pixel = Pixel::new(0, 0, 0, 0);

    /// Fully transparent white
    pub const TRANSPARENT_WHITE: Pixel = Pixel::new(255, 255, 255, 0);

    /// Opaque black
    pub const BLACK: Pixel = Pixel::new(0, 0, 0, 255);

    /// Opaque white
    pub const WHITE: Pixel = Pixel::new(255, 255, 255, 255);

    /// Colors which are allowed in the top-left corner of an encoded image
    pub const BACKGROUNDS: [Pixel; 4] = [
        Pixel::TRANSPARENT_BLACK,
        Pixel::TRANSPARENT_WHITE,
        Pixel::BLACK,
        Pixel::WHITE,
    ];

    /// Create a new pixel
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Pixel([red, green, blue, alpha])
    }

    /// Get the red channel
    pub fn red(self) -> u8 {
        self.0[0]
    }

    /// Get the green channel
    pub fn green(self) -> u8 {
        self.0[1]
    }

    /// Get the blue channel
    pub fn blue(self) -> u8 {
        self.0[2]
    }

    /// Get the alpha channel
    pub fn alpha(self) -> u8 {
        self.0[3]
    }

    /// Get all channels, in RGBA order
    pub fn channels(self) -> [u8; 4] {
        self.0
    }

    /// Check if the pixel is one of the background colors
    pub fn is_background(self) -> bool {
        Pixel::BACKGROUNDS.contains(&self)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(channels: [u8; 4]) -> Self {
        Pixel(channels)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(clr: Pixel) -> Self {
        clr.0
    }
}

impl From<Pixel> for SRgba8 {
    fn from(clr: Pixel) -> Self {
        SRgba8::new(clr.red(), clr.green(), clr.blue(), clr.alpha())
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(fmt, "{r},{g},{b},{a}")
    }
}

impl FromStr for Pixel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(s);
        let mut channels = [0; 4];
        let mut values = s.split(',');
        for ch in channels.iter_mut() {
            let v = values.next().ok_or(Error::MalformedColor)?;
            *ch = v.trim().parse().map_err(|_| Error::MalformedColor)?;
        }
        if values.next().is_some() {
            return Err(Error::MalformedColor);
        }
        Ok(Pixel(channels))
    }
}
