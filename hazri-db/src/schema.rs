table! {
    attendance_goals (id) {
        id -> Int4,
        user_id -> Int4,
        institute_id -> Int4,
        target_percentage -> Float8,
        warning_threshold -> Float8,
        is_active -> Bool,
    }
}

table! {
    attendance_records (id) {
        id -> Int4,
        user_id -> Int4,
        institute_id -> Int4,
        subject_id -> Int4,
        attendance_date -> Date,
        status -> Varchar,
        selfie_image_path -> Nullable<Varchar>,
        notes -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

table! {
    attendance_warnings (id) {
        id -> Int4,
        user_id -> Int4,
        institute_id -> Int4,
        subject_id -> Nullable<Int4>,
        warning_type -> Varchar,
        message -> Text,
        attendance_percentage -> Float8,
        threshold_percentage -> Float8,
        is_read -> Bool,
        created_at -> Timestamp,
        read_at -> Nullable<Timestamp>,
    }
}

table! {
    enrollments (id) {
        id -> Int4,
        student_id -> Int4,
        teacher_id -> Int4,
        institute_id -> Int4,
        is_active -> Bool,
    }
}

table! {
    institutes (id) {
        id -> Int4,
        owner_id -> Int4,
        name -> Varchar,
        is_active -> Bool,
        created_at -> Timestamp,
    }
}

table! {
    subjects (id) {
        id -> Int4,
        institute_id -> Int4,
        name -> Varchar,
        difficulty -> Varchar,
        color_code -> Varchar,
        is_active -> Bool,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Text,
        user_role -> Varchar,
        is_active -> Bool,
        joined_at -> Timestamp,
    }
}

joinable!(attendance_goals -> institutes (institute_id));
joinable!(attendance_records -> institutes (institute_id));
joinable!(attendance_records -> subjects (subject_id));
joinable!(attendance_warnings -> institutes (institute_id));
joinable!(attendance_warnings -> subjects (subject_id));
joinable!(enrollments -> institutes (institute_id));
joinable!(subjects -> institutes (institute_id));

allow_tables_to_appear_in_same_query!(
    attendance_goals,
    attendance_records,
    attendance_warnings,
    enrollments,
    institutes,
    subjects,
    users,
);
