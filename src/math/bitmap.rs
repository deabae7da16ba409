// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f };

use std::ops;
use std::vec::Vec;

#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    data: Vec<Vector3f>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector3f;

    fn index(&self, index: (usize, usize)) -> &Vector3f {
        debug_assert!(index.0 < self.width && index.1 < self.height);
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Vector3f {
        debug_assert!(index.0 < self.width && index.1 < self.height);
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl<'a> ops::AddAssign<&'a Bitmap> for Bitmap {
    fn add_assign(&mut self, rhs: &'a Bitmap) {
        assert_eq!((self.width, self.height), (rhs.width, rhs.height));
        for (dst, src) in self.data.iter_mut().zip(rhs.data.iter()) {
            *dst += *src;
        }
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(Vector3f::new(0.0, 0.0, 0.0);
                          pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Vector3f] {
        &self.data
    }

    /// Copy of the bitmap with every pixel multiplied by `factor`.
    pub fn scaled(&self, factor: Float) -> Bitmap {
        Bitmap {
            data: self.data.iter().map(|p| *p * factor).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Average over all pixels and channels.
    pub fn mean(&self) -> Float {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|p| (p.x + p.y + p.z) as f64).sum();
        (sum / (3 * self.data.len()) as f64) as Float
    }

    pub fn raw_copy(&self) -> Vec<(Float, Float, Float)> {
        self.data.iter().map(|p| (p.x, p.y, p.z)).collect()
    }
}

/* Test for Bitmap */
