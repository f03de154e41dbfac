use std::error::Error;
use std::fs::File;
use std::io::BufReader;

use obj::{load_obj, Obj};

use super::Triangle;
use crate::raytracing::{Mat4, Material, Vec3};

/// Loads a triangulated OBJ file with vertex normals as a list of smooth
/// triangles, placed in the scene by `trasform`.
pub fn load_model(
    filename: &str,
    material: Material,
    trasform: &Mat4,
) -> Result<Vec<Triangle>, Box<dyn Error>> {
    let input = BufReader::new(File::open(filename)?);
    let obj: Obj = load_obj(input)?;
    let (triangles, skipped) = triangles_from_obj(&obj, material, trasform);
    if skipped > 0 {
        eprintln!("{}: skipped {} degenerate faces", filename, skipped);
    }
    Ok(triangles)
}

/// Returns the triangles and the number of faces that could not form one.
fn triangles_from_obj(obj: &Obj, material: Material, trasform: &Mat4) -> (Vec<Triangle>, usize) {
    let vertex = |index: u16| {
        let vertex = &obj.vertices[index as usize];
        let position = trasform.apply_point(vertex.position.into());
        let normal: Vec3 = vertex.normal.into();
        let normal = if normal.is_zero() {
            normal
        } else {
            trasform.apply_vector(normal).normalize()
        };
        (position, normal)
    };

    let mut skipped = 0;
    let triangles = obj
        .indices
        .chunks_exact(3)
        .filter_map(|face| {
            let (a, na) = vertex(face[0]);
            let (b, nb) = vertex(face[1]);
            let (c, nc) = vertex(face[2]);
            let triangle = if na.is_zero() || nb.is_zero() || nc.is_zero() {
                Triangle::new(a, b, c, material)
            } else {
                Triangle::with_normals(a, b, c, na, nb, nc, material)
            };
            if triangle.is_err() {
                skipped += 1;
            }
            triangle.ok()
        })
        .collect();
    (triangles, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raytracing::Ray;
    use std::fs;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
f 1//1 3//1 4//1
";

    #[test]
    fn loads_and_transforms_faces() {
        let path = std::env::temp_dir().join("whitted_rs_quad.obj");
        fs::write(&path, QUAD).unwrap();
        let trasform = Mat4::scale(2.0).then(&Mat4::translate(Vec3::new(0.0, 0.0, -1.0)));
        let triangles =
            load_model(path.to_str().unwrap(), Material::default(), &trasform).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(triangles.len(), 2);
        let expected = Triangle::with_normals(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(2.0, 0.0, -1.0),
            Vec3::new(2.0, 2.0, -1.0),
            Vec3::z_axis(),
            Vec3::z_axis(),
            Vec3::z_axis(),
            Material::default(),
        )
        .unwrap();
        assert_eq!(triangles[0], expected);

        // the scaled quad covers (1.5, 1.5)
        let ray = Ray::new(Vec3::new(1.5, 1.5, 3.0), -Vec3::z_axis());
        assert!(triangles.iter().any(|triangle| triangle.hit(&ray).is_some()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_model("does/not/exist.obj", Material::default(), &Mat4::identity());
        assert!(result.is_err());
    }
}
