use super::{LinkedBox, Vec3D};

#[test]
fn test_linked_box_evicts_oldest() {
    let mut ring = LinkedBox::new(3);
    for i in 0..3 {
        assert_eq!(ring.push(i), None);
    }
    assert_eq!(ring.push(3), Some(0));
    assert_eq!(ring.len(), 3);
    assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_linked_box_zero_size_keeps_latest() {
    let mut ring = LinkedBox::new(0);
    assert!(ring.is_empty());
    assert_eq!(ring.push("a"), None);
    assert_eq!(ring.push("b"), Some("a"));
    assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn test_vec3d_distance_and_normalize() {
    let a = Vec3D::<f64>::new(0.0, 0.0, 10.0);
    let b = Vec3D::<f64>::new(3.0, 4.0, 10.0);
    assert!((a.euclid_distance(&b) - 5.0).abs() < 1e-12);
    assert!((a.to(&b).horizontal_abs() - 5.0).abs() < 1e-12);
    let unit = a.to(&b).normalize();
    assert!((unit.abs() - 1.0).abs() < 1e-12);
    assert!(Vec3D::<f64>::zero().normalize().is_zero());
    assert!(b.in_radius_of(&a, 5.0));
    assert!(!b.in_radius_of(&a, 4.99));
}

#[test]
fn test_vec3d_heading_rotation() {
    let mut forward = Vec3D::<f64>::new(0.0, 1.0, 2.0);
    forward.rotate_heading_by(90.0);
    assert!((forward.x() - 1.0).abs() < 1e-12);
    assert!(forward.y().abs() < 1e-12);
    assert!((forward.z() - 2.0).abs() < f64::EPSILON);

    let mut right = Vec3D::<f64>::new(1.0, 0.0, 0.0);
    right.rotate_heading_by(180.0);
    assert!((right.x() + 1.0).abs() < 1e-12);
}
