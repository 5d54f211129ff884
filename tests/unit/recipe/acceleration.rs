use super::*;

#[test]
fn geometry_counts_depend_on_kind() {
    let tri = Geometry::new(GeometryType::Triangle, vec![0.0; 18]);
    assert_eq!(tri.vertex_count(), 6);
    assert_eq!(tri.primitive_count(), 2);

    let aabb = Geometry::new(GeometryType::Aabb, vec![0.0; 12]);
    assert_eq!(aabb.vertex_count(), 4);
    assert_eq!(aabb.primitive_count(), 2);
}

#[test]
fn instance_fields_are_range_checked() {
    let mut inst = BlasInstance::default();
    assert_eq!(inst.mask(), 0xFF);

    inst.set_instance_index(0xFF_FFFF).unwrap();
    let err = inst.set_instance_index(1 << 24).unwrap_err();
    assert_eq!(
        err.to_string(),
        "instance custom index must fit in 24 bits, got: 16777216"
    );
    assert_eq!(inst.instance_index(), 0xFF_FFFF);

    assert!(inst.set_mask(0x100).is_err());
    assert!(inst.set_flags(0x100).is_err());
    assert!(inst.set_offset(1 << 24).is_err());
    inst.set_flags(0x0F).unwrap();
    assert_eq!(inst.flags(), 0x0F);

    assert!(inst.set_transform(vec![1.0; 11]).is_err());
    inst.set_transform(vec![1.0; 12]).unwrap();
    assert_eq!(inst.transform().len(), 12);
}

#[test]
fn group_kinds() {
    let mut group = ShaderGroup::new("g");
    assert!(!group.is_general_group());
    assert!(!group.is_hit_group());

    group.any_hit = Some(ShaderId(2));
    assert!(group.is_hit_group());
    group.general = Some(ShaderId(1));
    assert!(group.is_general_group());
    assert_eq!(group.shaders().collect::<Vec<_>>(), vec![ShaderId(1), ShaderId(2)]);
}

#[test]
fn sbt_size_sums_record_counts() {
    let mut sbt = Sbt::new("sbt");
    sbt.records.push(SbtRecord::new("a"));
    let mut rec = SbtRecord::new("b");
    rec.count = 3;
    sbt.records.push(rec);
    assert_eq!(sbt.size(), 4);
    assert_eq!(sbt.records[0].pipeline_index, u32::MAX);
}
