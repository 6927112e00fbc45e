/// Iterates the physical buffer offsets of a strided layout in row-major
/// logical order.
///
/// Works for contiguous tensors, views (transposed, sliced) and broadcast
/// layouts (stride 0).
#[derive(Debug, Clone)]
pub struct StridedIndexIter<'a> {
    shape: &'a [usize],
    strides: &'a [usize],
    coords: Vec<usize>,
    current: usize,
    remaining: usize,
}

impl<'a> StridedIndexIter<'a> {
    pub fn new(shape: &'a [usize], strides: &'a [usize], offset: usize) -> Self {
        StridedIndexIter {
            shape,
            strides,
            coords: vec![0; shape.len()],
            current: offset,
            remaining: shape.iter().product(),
        }
    }
}

impl Iterator for StridedIndexIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.current;
        self.remaining -= 1;
        // Odometer increment, last axis fastest.
        for dim in (0..self.shape.len()).rev() {
            self.coords[dim] += 1;
            self.current += self.strides[dim];
            if self.coords[dim] < self.shape[dim] {
                break;
            }
            self.current -= self.strides[dim] * self.coords[dim];
            self.coords[dim] = 0;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StridedIndexIter<'_> {}
