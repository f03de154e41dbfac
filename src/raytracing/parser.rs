use std::fmt;
use std::path::{Path, PathBuf};

use super::error::GeometryError;
use super::{
    camera::Camera, load_model, Color, DirectionalLight, Disc, Geometry, Light, Mat4, Material,
    Plane, PointLight, Sphere, Texture, Torus, Triangle, Vec3, World,
};

pub struct SceneParser {
    content: Vec<char>,
    // directory the model paths are relative to
    base_dir: Option<PathBuf>,
    // a token already read by `peek` together with where it starts
    buffer: Option<(String, FilePosition)>,
    position: FilePosition,
    token_start: FilePosition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FilePosition {
    line: u32,
    column: u32,
    index: u32,
}

impl FilePosition {
    fn new() -> Self {
        FilePosition {
            line: 0,
            column: 0,
            index: 0,
        }
    }

    fn on_new_line(&mut self) {
        self.line += 1;
        self.column = 0;
        self.index += 1;
    }

    fn advance(&mut self) {
        self.column += 1;
        self.index += 1;
    }
}

#[derive(Debug)]
pub struct ParserError {
    position: FilePosition,
    pub message: String,
}

impl ParserError {
    fn new(message: &str, position: FilePosition) -> ParserError {
        ParserError {
            position,
            message: message.to_string(),
        }
    }

    /// Line and column of the error, both starting from one.
    pub fn location(&self) -> (u32, u32) {
        (self.position.line + 1, self.position.column + 1)
    }

    pub fn print_error_location(&self, content: &str) {
        println!("{}", self);
        if let Some(line) = content.lines().nth(self.position.line as usize) {
            println!("{}", line);
            let spacing = " ".repeat(self.position.column as usize);
            println!("{}^", spacing);
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (line, column) = self.location();
        write!(f, "{} at {}:{}", self.message, line, column)
    }
}

impl std::error::Error for ParserError {}

type ParserResult<T> = Result<T, ParserError>;

pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub camera: Camera,
    pub world: World,
}

impl SceneParser {
    pub fn new(content: &str) -> SceneParser {
        SceneParser {
            content: content.chars().collect(),
            base_dir: None,
            buffer: None,
            position: FilePosition::new(),
            token_start: FilePosition::new(),
        }
    }

    /// Resolve relative model paths against `dir` instead of the working directory.
    pub fn with_base_dir(mut self, dir: &Path) -> SceneParser {
        self.base_dir = Some(dir.to_path_buf());
        self
    }

    fn get_current_char(&self) -> Option<char> {
        self.content.get(self.position.index as usize).copied()
    }

    fn is_empty(&mut self) -> bool {
        // a peek at the end of the input buffers the empty token
        if let Some((token, _)) = &self.buffer {
            return token.is_empty();
        }
        self.eat_spaces();
        self.get_current_char().is_none()
    }

    fn advance(&mut self) -> bool {
        if let Some(current_char) = self.get_current_char() {
            if current_char == '\n' {
                self.position.on_new_line();
            } else {
                self.position.advance();
            }
            return true;
        }
        false
    }

    fn advance_until(&mut self, f: impl Fn(char) -> bool) {
        while let Some(current_char) = self.get_current_char() {
            if f(current_char) {
                break;
            }
            self.advance();
        }
    }

    fn eat_spaces(&mut self) {
        // consume all the empty lines, spaces and comments before the next token
        while let Some(current_char) = self.get_current_char() {
            if current_char == '#' {
                // the end-of-line is consumed at the end of the loop
                self.advance_until(|c| c == '\n');
            } else if !current_char.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    // add the current char to the result string and return the next one
    fn enqueue(&mut self, result: &mut String) -> char {
        if let Some(current_char) = self.get_current_char() {
            result.push(current_char);
            self.advance();
        }
        self.get_current_char().unwrap_or(' ')
    }

    fn pop(&mut self) -> String {
        // check if we already peeked without eating the next token
        if let Some((token, start)) = self.buffer.take() {
            self.token_start = start;
            return token;
        }

        self.eat_spaces();
        self.token_start = self.position;
        let mut result = String::new();
        let Some(mut current_char) = self.get_current_char() else {
            return result;
        };

        match current_char {
            // if char is a symbol return it
            ',' | '(' | ')' | ':' | '>' => {
                self.advance();
                result.push(current_char);
            }
            '"' => {
                // no escapes, the string ends at the next quote
                current_char = self.enqueue(&mut result);
                while current_char != '"' && self.get_current_char().is_some() {
                    current_char = self.enqueue(&mut result);
                }
                self.enqueue(&mut result);
            }
            '.' | '+' | '-' | '0'..='9' => {
                if current_char == '+' || current_char == '-' {
                    current_char = self.enqueue(&mut result);
                }
                while current_char.is_ascii_digit() {
                    current_char = self.enqueue(&mut result);
                }
                if current_char == '.' {
                    current_char = self.enqueue(&mut result);
                    while current_char.is_ascii_digit() {
                        current_char = self.enqueue(&mut result);
                    }
                }
            }
            _ => {
                while current_char.is_alphanumeric() || current_char == '_' {
                    current_char = self.enqueue(&mut result);
                }
                if result.is_empty() {
                    // unknown symbol, return it alone so it can be reported
                    self.enqueue(&mut result);
                }
            }
        }
        result
    }

    fn peek(&mut self) -> &str {
        // peek always look ahead and save the result to the buffer
        if self.buffer.is_none() {
            let token = self.pop();
            self.buffer = Some((token, self.token_start));
        }
        self.buffer.as_ref().map_or("", |(token, _)| token.as_str())
    }

    fn error<T>(&self, message: &str) -> ParserResult<T> {
        Err(ParserError::new(message, self.token_start))
    }

    fn error_at<T>(&self, message: &str, position: FilePosition) -> ParserResult<T> {
        Err(ParserError::new(message, position))
    }

    fn check<T>(
        &self,
        result: Result<T, GeometryError>,
        position: FilePosition,
    ) -> ParserResult<T> {
        result.or_else(|err| self.error_at(&err.to_string(), position))
    }

    fn parse_float(&mut self) -> ParserResult<f64> {
        let next_token = self.pop();
        if let Ok(num) = next_token.parse::<f64>() {
            Ok(num)
        } else {
            let message = format!("cannot interp '{}' as a float", next_token);
            self.error(&message)
        }
    }

    fn parse_integer(&mut self) -> ParserResult<i64> {
        let value = self.parse_float()?;
        if value.fract() != 0.0 {
            return self.error(&format!("expected an integer, getting {}", value));
        }
        Ok(value as i64)
    }

    fn match_token(&mut self, expected_lexem: &str) -> ParserResult<()> {
        // consume a lexem and if is different from the expected one raise an error
        let next_lexem = self.pop();
        if next_lexem != expected_lexem {
            let message = format!(
                "expected '{}', getting '{}' instead",
                expected_lexem, next_lexem
            );
            self.error(&message)
        } else {
            Ok(())
        }
    }

    fn maybe_match(&mut self, expected_lexem: &str) -> bool {
        // if the expected lexem is the next in the stream, we consume it and returns true.
        // return false otherwise leaving the stream untouched
        if self.peek() == expected_lexem {
            self.pop();
            return true;
        }
        false
    }

    fn parse_header(&mut self) -> ParserResult<(u32, u32)> {
        self.match_token("size")?;
        let width = self.parse_integer()?;
        let height = self.parse_integer()?;
        if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
            return self.error("the image size must be positive");
        }
        Ok((width as u32, height as u32))
    }

    fn parse_vec3(&mut self) -> ParserResult<Vec3> {
        self.match_token("(")?;
        let x = self.parse_float()?;
        self.match_token(",")?;
        let y = self.parse_float()?;
        self.match_token(",")?;
        let z = self.parse_float()?;
        self.match_token(")")?;
        Ok(Vec3::new(x, y, z))
    }

    fn parse_color(&mut self) -> ParserResult<Color> {
        let token = self.peek().to_string();
        let named = match token.as_str() {
            "red" => Vec3::new(1.0, 0.0, 0.0),
            "blue" => Vec3::new(0.0, 0.0, 1.0),
            "green" => Vec3::new(0.0, 1.0, 0.0),
            "white" => Vec3::new(1.0, 1.0, 1.0),
            "black" => Vec3::new(0.0, 0.0, 0.0),
            "grey" | "gray" => Vec3::new(0.5, 0.5, 0.5),
            "cyan" => Vec3::new(0.0, 1.0, 1.0),
            "violet" => Vec3::new(1.0, 0.0, 1.0),
            "fuchsia" => Vec3::new(0.96, 0.0, 0.96),
            "yellow" => Vec3::new(1.0, 1.0, 0.0),
            "orange" => Vec3::new(0.98, 0.45, 0.02),
            _ => return self.parse_vec3(),
        };
        self.pop();
        Ok(named)
    }

    fn parse_texture(&mut self) -> ParserResult<Texture> {
        if self.maybe_match("checker") {
            let even = self.parse_color()?;
            let odd = self.parse_color()?;
            Ok(Texture::Checkerboard { even, odd })
        } else {
            Ok(Texture::SingleColor(self.parse_color()?))
        }
    }

    fn parse_material(&mut self) -> ParserResult<Material> {
        let kind = self.peek().to_string();
        let material = match kind.as_str() {
            "single" | "lambert" | "phong" | "reflective" => {
                self.pop();
                self.match_token(":")?;
                let texture = self.parse_texture()?;
                match kind.as_str() {
                    "single" => Material::SingleColor { texture },
                    "lambert" => Material::Lambert { texture },
                    "phong" => Material::Phong {
                        texture,
                        specular: Vec3::one(),
                        exponent: self.parse_float()?,
                    },
                    _ => Material::Reflective {
                        texture,
                        specular: Vec3::one(),
                        exponent: self.parse_float()?,
                        reflection: self.parse_color()?,
                    },
                }
            }
            _ => Material::Lambert {
                texture: self.parse_texture()?,
            },
        };
        Ok(material)
    }

    fn parse_sphere(&mut self) -> ParserResult<Sphere> {
        self.match_token("sphere")?;
        let start = self.token_start;
        let center = self.parse_vec3()?;
        let radius = self.parse_float()?;
        let material = self.parse_material()?;
        self.check(Sphere::new(center, radius, material), start)
    }

    fn parse_plane(&mut self) -> ParserResult<Plane> {
        self.match_token("plane")?;
        let start = self.token_start;
        let point = self.parse_vec3()?;
        let normal = self.parse_vec3()?;
        let mut texture_scalar = 1;
        if self.maybe_match("scale") {
            let scale = self.parse_integer()?;
            texture_scalar = match i32::try_from(scale) {
                Ok(scale) => scale,
                Err(_) => return self.check(Err(GeometryError::InvalidTextureScale(scale)), start),
            };
        }
        let material = self.parse_material()?;
        self.check(Plane::new(point, normal, material, texture_scalar), start)
    }

    fn parse_disc(&mut self) -> ParserResult<Disc> {
        self.match_token("disc")?;
        let start = self.token_start;
        let center = self.parse_vec3()?;
        let normal = self.parse_vec3()?;
        let radius = self.parse_float()?;
        let material = self.parse_material()?;
        self.check(Disc::new(center, normal, radius, material), start)
    }

    fn parse_triangle(&mut self) -> ParserResult<Triangle> {
        self.match_token("triangle")?;
        let start = self.token_start;
        let a = self.parse_vec3()?;
        let b = self.parse_vec3()?;
        let c = self.parse_vec3()?;
        let material = self.parse_material()?;
        self.check(Triangle::new(a, b, c, material), start)
    }

    fn parse_torus(&mut self) -> ParserResult<Torus> {
        self.match_token("torus")?;
        let start = self.token_start;
        let radius = self.parse_float()?;
        let tube_radius = self.parse_float()?;
        let material = self.parse_material()?;
        self.check(Torus::new(radius, tube_radius, material), start)
    }

    fn parse_string(&mut self) -> ParserResult<String> {
        let next_token = self.pop();
        match next_token
            .strip_prefix('"')
            .and_then(|token| token.strip_suffix('"'))
        {
            Some(content) => Ok(content.to_string()),
            None => self.error(&format!("expected a quoted string, getting {}", next_token)),
        }
    }

    fn parse_camera(&mut self) -> ParserResult<Camera> {
        self.match_token("camera")?;
        let mut position = Vec3::zero();
        if self.maybe_match("from") {
            position = self.parse_vec3()?;
        }
        let target = if self.maybe_match("to") {
            self.parse_vec3()?
        } else {
            position + Vec3::z_axis()
        };
        let mut up = Vec3::y_axis();
        if self.maybe_match("up") {
            up = self.parse_vec3()?;
        }
        let mut fov = 90.0;
        if self.maybe_match("fov") {
            fov = self.parse_float()?;
            if !(fov > 0.0 && fov < 180.0) {
                return self.error("the field of view must be between 0 and 180 degrees");
            }
        }
        Ok(Camera::look_at(position, target, up, fov))
    }

    fn parse_trasformation(&mut self) -> ParserResult<Mat4> {
        let mut trasform = Mat4::identity();
        while self.maybe_match(">") {
            let next_token = self.pop();
            let next_trasform = match next_token.as_str() {
                "scale" => Mat4::scale(self.parse_float()?),
                "translate" => Mat4::translate(self.parse_vec3()?),
                "rotate" => {
                    let axis = self.parse_vec3()?;
                    if axis.is_zero() {
                        return self.error("the rotation axis must not be zero");
                    }
                    // degrees in the scene file
                    let angle = self.parse_float()?;
                    Mat4::rotate(axis, angle.to_radians())
                }
                _ => {
                    let message = format!("unexpected token '{}' while parsing trasform", next_token);
                    return self.error(&message);
                }
            };
            trasform = trasform.then(&next_trasform);
        }
        Ok(trasform)
    }

    fn parse_model(&mut self) -> ParserResult<Vec<Triangle>> {
        self.match_token("model")?;
        let start = self.token_start;
        let path = self.parse_string()?;
        let material = self.parse_material()?;
        let trasform = self.parse_trasformation()?;
        let full_path = match &self.base_dir {
            Some(dir) => dir.join(&path),
            None => PathBuf::from(&path),
        };
        load_model(&full_path.to_string_lossy(), material, &trasform).or_else(|err| {
            let message = format!("cannot load model \"{}\": {}", path, err);
            self.error_at(&message, start)
        })
    }

    fn parse_light(&mut self) -> ParserResult<Light> {
        self.match_token("light")?;
        let start = self.token_start;
        let kind = self.pop();
        let vector = self.parse_vec3()?;
        let color = self.parse_color()?;
        let casts_shadow = self.maybe_match("shadow");
        match kind.as_str() {
            "point" => Ok(PointLight::new(color, vector, casts_shadow).into()),
            "directional" => {
                let light = DirectionalLight::new(color, vector, casts_shadow);
                Ok(self.check(light, start)?.into())
            }
            _ => self.error_at(&format!("unknown light type '{}'", kind), start),
        }
    }

    pub fn parse_scene(&mut self) -> ParserResult<ImageData> {
        // main routine that parse the whole file
        let (width, height) = self.parse_header()?;

        let mut camera = Camera::default();
        let mut background = Vec3::zero();
        let mut ambient = Vec3::zero();
        let mut geometries: Vec<Geometry> = Vec::new();
        let mut lights = Vec::new();
        while !self.is_empty() {
            let next_token = self.peek().to_string();
            match next_token.as_str() {
                "camera" => camera = self.parse_camera()?,
                "background" => {
                    self.pop();
                    background = self.parse_color()?;
                }
                "ambient" => {
                    self.pop();
                    ambient = self.parse_color()?;
                }
                "light" => lights.push(self.parse_light()?),
                "sphere" => geometries.push(self.parse_sphere()?.into()),
                "plane" => geometries.push(self.parse_plane()?.into()),
                "disc" => geometries.push(self.parse_disc()?.into()),
                "triangle" => geometries.push(self.parse_triangle()?.into()),
                "torus" => geometries.push(self.parse_torus()?.into()),
                "model" => {
                    let model = self.parse_model()?;
                    geometries.extend(model.into_iter().map(Geometry::from));
                }
                _ => {
                    self.pop();
                    let message = format!("unexpected token '{}'", next_token);
                    return self.error(&message);
                }
            }
        }

        let mut world = World::new(background, ambient);
        for geometry in geometries {
            world.add_geometry(geometry);
        }
        for light in lights {
            world.add_light(light);
        }
        Ok(ImageData {
            width,
            height,
            camera: camera.with_aspect_ratio(width as f64 / height as f64),
            world,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raytracing::Ray;
    use approx::assert_abs_diff_eq;
    use std::fs;

    fn parse(content: &str) -> ParserResult<ImageData> {
        SceneParser::new(content).parse_scene()
    }

    const SCENE: &str = r#"
size 320 200
# a comment line
camera from (0, 1, -5) to (0, 0, 0) fov 60

background (0.1, 0.2, 0.3)
ambient grey

light point (0, 10, 0) white shadow
light directional (1, -1, 0) (0.5, 0.5, 0.5)

sphere (0, 0, 3) 1 phong: red 20   # trailing comment
plane (0, -1, 0) (0, 1, 0) scale 2 checker white black
disc (0, 0, 10) (0, 0, -1) 2 single: blue
triangle (0, 0, 0) (1, 0, 0) (0, 1, 0) lambert: green
torus 2 0.5 reflective: black 10 (0.8, 0.8, 0.8)
"#;

    #[test]
    fn parses_a_complete_scene() {
        let ImageData {
            width,
            height,
            camera,
            world,
        } = parse(SCENE).unwrap();
        assert_eq!((width, height), (320, 200));
        assert_eq!(camera.shoot_to(0.0, 0.0).origin, Vec3::new(0.0, 1.0, -5.0));
        assert_eq!(world.background(), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(world.ambient(), Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(world.geometries().len(), 5);
        assert_eq!(world.lights().len(), 2);
        assert!(world.lights()[0].casts_shadow());
        assert!(!world.lights()[1].casts_shadow());
        assert!(matches!(world.lights()[1], Light::Directional(_)));
    }

    #[test]
    fn parses_every_geometry_with_its_material() {
        let world = parse(SCENE).unwrap().world;
        let phong = Material::Phong {
            texture: Texture::SingleColor(Vec3::new(1.0, 0.0, 0.0)),
            specular: Vec3::one(),
            exponent: 20.0,
        };
        let checker = Material::Lambert {
            texture: Texture::Checkerboard {
                even: Vec3::one(),
                odd: Vec3::zero(),
            },
        };
        let single = Material::SingleColor {
            texture: Texture::SingleColor(Vec3::new(0.0, 0.0, 1.0)),
        };
        let reflective = Material::Reflective {
            texture: Texture::SingleColor(Vec3::zero()),
            specular: Vec3::one(),
            exponent: 10.0,
            reflection: Vec3::new(0.8, 0.8, 0.8),
        };
        let expected: Vec<Geometry> = vec![
            Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, phong).unwrap().into(),
            Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::y_axis(), checker, 2)
                .unwrap()
                .into(),
            Disc::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), 2.0, single)
                .unwrap()
                .into(),
            Triangle::new(
                Vec3::zero(),
                Vec3::x_axis(),
                Vec3::y_axis(),
                Material::lambert(Vec3::new(0.0, 1.0, 0.0)),
            )
            .unwrap()
            .into(),
            Torus::new(2.0, 0.5, reflective).unwrap().into(),
        ];
        assert_eq!(world.geometries(), &expected[..]);
    }

    #[test]
    fn camera_defaults_without_statement() {
        let data = parse("size 10 10\nsphere (0, 0, 3) 1 red").unwrap();
        let ray = data.camera.shoot_to(0.0, 0.0);
        assert_eq!(ray, Ray::new(Vec3::zero(), Vec3::z_axis()));
    }

    #[test]
    fn optional_token_at_end_of_input() {
        let data = parse("size 4 4\nsphere (0,0,3) 1 red\nlight point (0, 10, 0) white\n").unwrap();
        assert_eq!(data.world.lights().len(), 1);
        assert!(!data.world.lights()[0].casts_shadow());

        let data = parse("size 4 4\ncamera from (0,0,-1)\n").unwrap();
        let ray = data.camera.shoot_to(0.0, 0.0);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, -1.0));

        // no trailing newline either
        assert!(parse("size 4 4\ncamera from (0,0,-1) to (0,0,0) up (0,1,0)").is_ok());
    }

    #[test]
    fn reports_position_of_bad_number() {
        let err = parse("size 10 10\nsphere (0, 0, 3) big red").err().unwrap();
        assert_eq!(err.location(), (2, 18));
        assert!(err.message.contains("'big'"));
    }

    #[test]
    fn invalid_geometry_points_at_its_keyword() {
        let err = parse("size 10 10\n\n  sphere (0, 0, 3) -1 red").err().unwrap();
        assert_eq!(err.location(), (3, 3));
        assert!(err.message.contains("radius"));

        let err = parse("size 10 10\nlight directional (0, 0, 0) white").err().unwrap();
        assert_eq!(err.location(), (2, 1));
        assert_eq!(err.message, GeometryError::ZeroDirection.to_string());

        let err = parse("size 10 10\nplane (0, 0, 0) (0, 1, 0) scale 0 red").err().unwrap();
        assert_eq!(err.location(), (2, 1));
        assert_eq!(err.message, GeometryError::InvalidTextureScale(0).to_string());
    }

    #[test]
    fn degenerate_triangle_is_an_error() {
        let err = parse("size 4 4\ntriangle (0,0,0) (1,1,1) (2,2,2) red").err().unwrap();
        assert_eq!(err.message, GeometryError::DegenerateTriangle.to_string());
    }

    #[test]
    fn unexpected_token() {
        let err = parse("size 4 4\ncube (0,0,0) 1 red").err().unwrap();
        assert_eq!(err.message, "unexpected token 'cube'");
        assert_eq!(err.location(), (2, 1));
        assert!(parse("size 4 4\nsphere (0,0,0) 1 red *").is_err());
    }

    #[test]
    fn header_is_required() {
        assert!(parse("sphere (0,0,0) 1 red").is_err());
        assert!(parse("size 0 10").is_err());
        assert!(parse("size 10.5 10").is_err());
    }

    #[test]
    fn missing_model_is_reported() {
        let err = parse("size 4 4\nmodel \"nowhere/teapot.obj\" red > scale 2")
            .err()
            .unwrap();
        assert!(err.message.contains("nowhere/teapot.obj"));
        assert_eq!(err.location(), (2, 1));
    }

    #[test]
    fn loads_model_relative_to_base_dir() {
        let dir = std::env::temp_dir().join("whitted_rs_parser_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("tri.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        )
        .unwrap();
        let content = "size 4 4\nmodel \"tri.obj\" red > scale 2 > translate (0, 0, 5) > rotate (0, 0, 1) 0";
        let data = SceneParser::new(content)
            .with_base_dir(&dir)
            .parse_scene()
            .unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(data.world.geometries().len(), 1);
        assert!(matches!(data.world.geometries()[0], Geometry::Triangle(_)));
        // scaled by two and moved to z = 5
        let ray = Ray::new(Vec3::new(1.5, 0.25, 10.0), -Vec3::z_axis());
        let hit = data.world.hit(&ray).unwrap();
        assert_abs_diff_eq!(hit.t, 5.0, epsilon = 1e-9);
        let outside = Ray::new(Vec3::new(1.5, 0.75, 10.0), -Vec3::z_axis());
        assert!(data.world.hit(&outside).is_none());
    }
}
