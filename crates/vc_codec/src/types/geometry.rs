use crate::derive::Contract;
use crate::types::parse::delimited;

/// A position, written as `"x,y"`.
#[derive(Contract, Debug, Clone, Copy, PartialEq, Default)]
#[contract(opaque, default, type_path = "vc_codec::types::Point")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An extent, written as `"width,height"`.
#[derive(Contract, Debug, Clone, Copy, PartialEq, Default)]
#[contract(opaque, default, type_path = "vc_codec::types::Size")]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// An axis-aligned rectangle, written as `"x,y,width,height"`.
#[derive(Contract, Debug, Clone, Copy, PartialEq, Default)]
#[contract(opaque, default, type_path = "vc_codec::types::Rect")]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// A two component vector, written as `"x,y"`.
#[derive(Contract, Debug, Clone, Copy, PartialEq, Default)]
#[contract(opaque, default, type_path = "vc_codec::types::Vector2")]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// A four component vector, written as `"x,y,z,w"`.
#[derive(Contract, Debug, Clone, Copy, PartialEq, Default)]
#[contract(opaque, default, type_path = "vc_codec::types::Vector4")]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

delimited!(Point { x, y }: f32);
delimited!(Size { width, height }: f32);
delimited!(Rect { x, y, width, height }: f32);
delimited!(Vector2 { x, y }: f32);
delimited!(Vector4 { x, y, z, w }: f32);

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Size, Vector4};
    use crate::types::ParseValueError;
    use alloc::string::ToString;

    #[test]
    fn text_forms() {
        let rect = Rect::new(Point { x: 1.0, y: 2.5 }, Size { width: 3.0, height: 4.0 });
        assert_eq!(rect.to_string(), "1,2.5,3,4");
        assert_eq!("1, 2.5, 3, 4".parse::<Rect>(), Ok(rect));
        assert_eq!(rect.origin(), Point { x: 1.0, y: 2.5 });

        let v: Vector4 = "0,-1,0.25,1e3".parse().unwrap();
        assert_eq!(v.w, 1000.0);
    }

    #[test]
    fn wrong_arity() {
        assert_eq!(
            "1,2,3".parse::<Size>(),
            Err(ParseValueError::Arity { expected: 2, found: 3 })
        );
    }
}
