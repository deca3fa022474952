//! User, attorney and admin mappers

use legal_core::entities::{Admin, AdminAccount, AdminLogin, Attorney, User};
use legal_core::value_objects::{AdminPermissions, Snowflake};

use super::{parse_label, parse_optional_label, snowflake};
use crate::models::{AdminAccountModel, AdminLoginModel, AdminModel, AttorneyModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            gender: parse_optional_label(model.gender.as_deref(), "users.gender"),
            date_of_birth: model.date_of_birth,
            role: parse_label(&model.role, "users.role"),
            is_social_login: model.is_social_login,
            profile_picture: model.profile_picture,
            provider: parse_optional_label(model.provider.as_deref(), "users.provider"),
            provider_id: model.provider_id,
            is_active: model.is_active,
            deleted_at: model.deleted_at,
            deletion_reason: model.deletion_reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AttorneyModel> for Attorney {
    fn from(model: AttorneyModel) -> Self {
        Attorney {
            id: Snowflake::new(model.id),
            user_id: snowflake(model.user_id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            gender: parse_optional_label(model.gender.as_deref(), "attorneys.gender"),
            address: model.address,
            date_of_birth: model.date_of_birth,
            specialization: model.specialization,
            qualification: model.qualification,
            experience: model.experience,
            fees: model.fees,
            profile_picture: model.profile_picture,
            practice: model.practice.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AdminModel> for Admin {
    fn from(model: AdminModel) -> Self {
        Admin {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            permissions: AdminPermissions::from_i64(model.permissions),
            last_login_at: model.last_login_at,
            login_count: model.login_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AdminAccountModel> for AdminAccount {
    fn from(model: AdminAccountModel) -> Self {
        AdminAccount {
            admin: model.admin.into(),
            name: model.name,
            email: model.email,
        }
    }
}

impl From<AdminLoginModel> for AdminLogin {
    fn from(model: AdminLoginModel) -> Self {
        AdminLogin {
            id: Snowflake::new(model.id),
            admin_id: Snowflake::new(model.admin_id),
            login_time: model.login_time,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
        }
    }
}
