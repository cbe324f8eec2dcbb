use std::convert::TryFrom;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Copy for Vec2<T> where T: Copy {}

impl<T> Clone for Vec2<T>
where
    T: Copy,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Vec2<usize> {
    pub fn area(&self) -> usize {
        self.x * self.y
    }
}

impl Vec2<i32> {
    /// Returns the unsigned position if the point lies inside `size`.
    pub fn to_index_within(self, size: Vec2<usize>) -> Option<Vec2<usize>> {
        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        if x < size.x && y < size.y {
            Some(Vec2::new(x, y))
        } else {
            None
        }
    }
}

impl<T> From<[T; 2]> for Vec2<T>
where
    T: Copy,
{
    fn from(array: [T; 2]) -> Self {
        Self {
            x: array[0],
            y: array[1],
        }
    }
}

impl<T> From<Vec2<T>> for [T; 2]
where
    T: Copy,
{
    fn from(vec: Vec2<T>) -> Self {
        [vec.x, vec.y]
    }
}
