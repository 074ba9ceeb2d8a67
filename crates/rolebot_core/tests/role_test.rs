use rolebot_core::{CreateRoleRequest, ExternalRole, NewRole, NewRoleList};

#[test]
fn new_request_has_no_external_id() {
    let request = CreateRoleRequest::new("Admin");
    assert_eq!(request.name(), "Admin");
    assert!(request.supplied_external_id().is_none());
}

#[test]
fn builder_records_supplied_external_id() {
    let request = CreateRoleRequest::builder()
        .name("Admin")
        .external_id("123")
        .build()
        .unwrap();

    assert_eq!(request.supplied_external_id(), Some("123"));
}

#[test]
fn blank_external_id_counts_as_unset() {
    let request = CreateRoleRequest::builder()
        .name("Admin")
        .external_id("   ")
        .build()
        .unwrap();

    assert!(request.supplied_external_id().is_none());
}

#[test]
fn builder_requires_name() {
    assert!(CreateRoleRequest::builder().build().is_err());
}

#[test]
fn external_role_converts_to_local_record() {
    let external = ExternalRole {
        external_id: "871234".to_string(),
        name: "admin".to_string(),
    };

    assert_eq!(NewRole::from(external), NewRole::new("871234", "admin"));
}

#[test]
fn role_list_description_defaults_to_empty() {
    let list = NewRoleList::new("Colours");
    assert_eq!(list.name, "Colours");
    assert!(list.description.is_empty());
}
