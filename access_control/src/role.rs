#[derive(Clone)]
pub enum Role {
    Admin,           // owner - receives admin fees, sets privileged roles
    OperationsAdmin, // operations admin - set fees
}
