use crate::error::{Result, ShapeError};
use crate::registry::ShapeRegistry;
use crate::shape::{Field, Shape};

/// Recursive-descent reader for shape text and `type Name = shape;` lines.
pub(crate) struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
    registry: Option<&'a ShapeRegistry>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str, registry: Option<&'a ShapeRegistry>, max_depth: usize) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
            max_depth,
            registry,
        }
    }

    /// Resume parsing at byte offset `pos`.
    pub(crate) fn at(mut self, pos: usize) -> Self {
        self.pos = pos;
        self
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn parse_shape(&mut self) -> Result<Shape> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ShapeError::TooDeep {
                max: self.max_depth,
            });
        }
        let shape = self.parse_inner()?;
        self.depth -= 1;
        Ok(shape)
    }

    fn parse_inner(&mut self) -> Result<Shape> {
        self.skip_ws();
        match self.peek() {
            Some('[') => {
                self.bump();
                let elem = self.parse_shape()?;
                let shape = if self.eat(';') {
                    let len = self.number()?;
                    Shape::array(len, elem)
                } else {
                    Shape::seq(elem)
                };
                self.expect(']')?;
                Ok(shape)
            }
            Some('{') => {
                self.bump();
                let key = self.parse_shape()?;
                self.expect(':')?;
                let value = self.parse_shape()?;
                self.expect('}')?;
                Ok(Shape::map(key, value))
            }
            Some(_) => {
                let start = self.pos;
                let name = self.ident()?;
                if name == "struct" {
                    self.parse_struct()
                } else {
                    self.named(name, start)
                }
            }
            None => Err(self.error("expected a shape")),
        }
    }

    fn parse_struct(&mut self) -> Result<Shape> {
        self.expect('{')?;
        let mut fields = Vec::new();
        loop {
            if self.eat('}') {
                break;
            }
            let name = self.ident()?;
            self.expect(':')?;
            let shape = self.parse_shape()?;
            if name == "_" {
                fields.push(Field::skipped(name, shape));
            } else if fields.iter().any(|f: &Field| !f.skip && f.name == name) {
                return Err(self.error(format!("duplicate field {name}")));
            } else {
                fields.push(Field::new(name, shape));
            }
            if !self.eat(',') {
                self.expect('}')?;
                break;
            }
        }
        Ok(Shape::Struct(fields))
    }

    fn named(&self, name: &str, start: usize) -> Result<Shape> {
        if let Some(shape) = Shape::scalar(name) {
            return Ok(shape);
        }
        if name == "type" || name == "_" {
            return Err(ShapeError::Parse {
                offset: start,
                message: format!("unexpected {name}"),
            });
        }
        self.registry
            .and_then(|registry| registry.get(name))
            .cloned()
            .ok_or_else(|| ShapeError::UnsupportedType(name.to_string()))
    }

    /// Read one `type Name = shape;` definition, or `None` at end of input.
    pub(crate) fn parse_definition(&mut self) -> Result<Option<(String, Shape)>> {
        self.skip_ws();
        if self.peek().is_none() {
            return Ok(None);
        }
        if self.ident()? != "type" {
            return Err(self.error("expected `type`"));
        }
        let name = self.ident()?.to_string();
        self.expect('=')?;
        let shape = self.parse_shape()?;
        self.expect(';')?;
        Ok(Some((name, shape)))
    }

    /// Fail unless only whitespace and comments remain.
    pub(crate) fn finish(&mut self) -> Result<()> {
        self.skip_ws();
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected {c:?}"))),
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let src = self.src;
        let rest = &src[self.pos..];
        let len = rest
            .char_indices()
            .find(|&(i, c)| !(c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit())))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return Err(self.error("expected a name"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn number(&mut self) -> Result<usize> {
        self.skip_ws();
        let rest = &self.src[self.pos..];
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let value = rest[..len]
            .parse()
            .map_err(|_| self.error("expected an array length"))?;
        self.pos += len;
        Ok(value)
    }

    fn skip_ws(&mut self) {
        loop {
            let rest = &self.src[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.starts_with('#') {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected {expected:?}")))
        }
    }

    fn error(&self, message: impl Into<String>) -> ShapeError {
        ShapeError::Parse {
            offset: self.pos,
            message: message.into(),
        }
    }
}
