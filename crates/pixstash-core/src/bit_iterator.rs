/// Iterates the bits of a byte slice, most significant bit first.
pub struct BitIterator<'a> {
    bytes: &'a [u8],
    i: usize,
}

impl<'a> BitIterator<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitIterator { bytes, i: 0 }
    }
}

impl Iterator for BitIterator<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.bytes.get(self.i / 8)?;
        let shift = 7 - (self.i % 8) as u8;
        self.i += 1;

        Some((byte >> shift) & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() * 8 - self.i;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIterator<'_> {}
