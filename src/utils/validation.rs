// Validación de formularios (login, registro, generación)

use regex::Regex;

use crate::error::{FormField, ValidationError};
use crate::utils::constants::MIN_PASSWORD_LEN;

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("regex de email válida");
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_password(&self.password, FormField::Password)
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_password(&self.password, FormField::Password)?;
        validate_password(&self.confirm_password, FormField::ConfirmPassword)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::new(
                FormField::ConfirmPassword,
                "Les mots de passe ne correspondent pas",
            ));
        }
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new(FormField::Email, "Email requis"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::new(FormField::Email, "Email invalide"));
    }
    Ok(())
}

pub fn validate_password(password: &str, field: FormField) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(field, "Minimum 8 caractères"));
    }
    Ok(())
}

/// Devuelve la lista de ingredientes recortada, o error si está vacía
pub fn validate_ingredients(ingredients: &str) -> Result<&str, ValidationError> {
    let trimmed = ingredients.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            FormField::Ingredients,
            "Veuillez entrer au moins un ingrédient",
        ));
    }
    Ok(trimmed)
}
