use ncollide2d::na::{DMatrix, Point2};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

#[derive(Serialize)]
#[serde(remote = "Point2<f64>")]
pub struct Point2f64 {
    x: f64,
    y: f64,
}

/// Serializes a matrix as a list of rows, which is the layout plotting tools expect for
/// meshgrid-style data.
pub fn matrix_rows<S: Serializer>(m: &DMatrix<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(m.nrows()))?;
    for row in m.row_iter() {
        let values: Vec<f64> = row.iter().copied().collect();
        seq.serialize_element(&values)?;
    }
    seq.end()
}

pub fn optional_matrix_rows<S: Serializer>(
    m: &Option<DMatrix<f64>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match m {
        Some(m) => matrix_rows(m, serializer),
        None => serializer.serialize_none(),
    }
}

pub fn point_list<S: Serializer>(
    points: &[Point2<f64>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    struct Wrapped<'a>(&'a Point2<f64>);

    impl Serialize for Wrapped<'_> {
        fn serialize<T: Serializer>(&self, serializer: T) -> Result<T::Ok, T::Error> {
            Point2f64::serialize(self.0, serializer)
        }
    }

    let mut seq = serializer.serialize_seq(Some(points.len()))?;
    for p in points.iter() {
        seq.serialize_element(&Wrapped(p))?;
    }
    seq.end()
}
