pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_NAME_LENGTH: usize = 2;

pub const SQL_CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    name TEXT NOT NULL
)";
pub const SQL_SELECT_USERS: &str = "SELECT id, email, password, name FROM user ORDER BY id";
pub const SQL_SELECT_USER_BY_ID: &str = "SELECT id, email, password, name FROM user WHERE id = ?";
pub const SQL_INSERT_USER: &str = "INSERT INTO user (email, password, name) VALUES (?, ?, ?)";
pub const SQL_UPDATE_USER: &str = "UPDATE user SET email = ?, password = ?, name = ? WHERE id = ?";

pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";
